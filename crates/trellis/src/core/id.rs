use std::{
    any::type_name,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use slotmap::new_key_type;

new_key_type! {
    /// Identifier for a node in the tree arena. Stale after the node is
    /// removed; lookups with a stale id fail with `NodeNotFound`.
    pub struct NodeId;
}

/// A node handle that remembers the concrete widget type it was created
/// with, so `Tree::widget` and `with_widget` callers don't restate it.
pub struct TypedId<W> {
    /// Untyped node identifier.
    id: NodeId,
    /// Widget type.
    _widget: PhantomData<fn() -> W>,
}

impl<W> TypedId<W> {
    /// Tag an untyped identifier. The tag is not checked until the widget is
    /// accessed.
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            _widget: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<W> fmt::Debug for TypedId<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = type_name::<W>();
        let short = name.rsplit("::").next().unwrap_or(name);
        write!(f, "{short}@{:?}", self.id)
    }
}

impl<W> Clone for TypedId<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for TypedId<W> {}

impl<W> PartialEq for TypedId<W> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<W> Eq for TypedId<W> {}

impl<W> Hash for TypedId<W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<W> PartialEq<NodeId> for TypedId<W> {
    fn eq(&self, other: &NodeId) -> bool {
        self.id == *other
    }
}

impl<W> PartialEq<TypedId<W>> for NodeId {
    fn eq(&self, other: &TypedId<W>) -> bool {
        *self == other.id
    }
}

impl<W> From<TypedId<W>> for NodeId {
    fn from(value: TypedId<W>) -> Self {
        value.id
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn compares_with_untyped() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let (a, b) = (arena.insert(()), arena.insert(()));
        let ta = TypedId::<String>::new(a);
        assert_eq!(ta, a);
        assert_eq!(a, ta);
        assert!(ta != b);
        assert_eq!(NodeId::from(ta), a);
        assert!(format!("{ta:?}").starts_with("String@"));
    }
}

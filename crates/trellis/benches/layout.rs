//! Benchmarks for full layout and incremental redraw of a wide tree.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{
    NodeId, Result, TermBuf, Tree,
    geom::{Expanse, Point},
    layout::{LinearContainer, LinearSlot, Viewport},
    tree::Invalidate,
    widgets::Label,
};

/// A viewport over a column of `rows` rows, each holding `cols` labels.
fn build(rows: u32, cols: u32) -> Result<(Tree, NodeId, Vec<NodeId>)> {
    let mut tree = Tree::new();
    let vp = tree.create(Viewport::new());
    let column = tree.add(vp, LinearContainer::vertical(), LinearSlot::new())?;
    let mut leaves = Vec::new();
    for r in 0..rows {
        let row = tree.add(column, LinearContainer::horizontal(), LinearSlot::new())?;
        for c in 0..cols {
            let l = tree.add(row, Label::new(&format!("{r}:{c}")), LinearSlot::new().with_grow(1.0))?;
            leaves.push(l.id());
        }
    }
    tree.set_root(vp)?;
    tree.assign(vp, Point::zero(), Expanse::new(80, 24))?;
    Ok((tree, vp.id(), leaves))
}

fn benchmark_layout(c: &mut Criterion) {
    c.bench_function("layout_200x8", |b| {
        b.iter(|| {
            let (mut tree, root, _) = build(200, 8).expect("build");
            tree.layout(root).expect("layout");
            black_box(tree);
        });
    });
}

fn benchmark_redraw(c: &mut Criterion) {
    let (mut tree, root, leaves) = build(200, 8).expect("build");
    tree.layout(root).expect("layout");
    let mut buf = TermBuf::blank((80, 24));
    tree.draw(root, &mut buf).expect("draw");
    c.bench_function("redraw_one_leaf", |b| {
        b.iter(|| {
            tree.invalidate(leaves[7], Invalidate::Own).expect("invalidate");
            tree.draw(root, &mut buf).expect("draw");
            black_box(&buf);
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_layout, benchmark_redraw
}
criterion_main!(benches);

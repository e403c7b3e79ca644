mod formgym;

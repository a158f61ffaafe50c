use ddcore::prelude::*;

#[test]
fn connectives_are_commutative() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let x3 = dd.ith_var(3).unwrap();
    let a = dd.bdd_or(x1, x3);
    let b = dd.bdd_xor(x2, x3);
    assert_eq!(dd.bdd_and(a, b), dd.bdd_and(b, a));
    assert_eq!(dd.bdd_or(a, b), dd.bdd_or(b, a));
    assert_eq!(dd.bdd_xor(a, b), dd.bdd_xor(b, a));
}

#[test]
fn connectives_are_associative() {
    let mut dd = DdManager::new(4);
    let a = dd.ith_var(1).unwrap();
    let b = dd.ith_var(2).unwrap();
    let c = dd.ith_var(3).unwrap();
    let ab = dd.bdd_and(a, b);
    let bc = dd.bdd_and(b, c);
    assert_eq!(dd.bdd_and(ab, c), dd.bdd_and(a, bc));
    let ab = dd.bdd_or(a, b);
    let bc = dd.bdd_or(b, c);
    assert_eq!(dd.bdd_or(ab, c), dd.bdd_or(a, bc));
    let ab = dd.bdd_xor(a, b);
    let bc = dd.bdd_xor(b, c);
    assert_eq!(dd.bdd_xor(ab, c), dd.bdd_xor(a, bc));
}

#[test]
fn double_negation_and_de_morgan() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let a = dd.bdd_xor(x1, x2);
    let nn = dd.bdd_not(dd.bdd_not(a));
    assert_eq!(nn, a);
    let and_ab = dd.bdd_and(x1, x2);
    let left = dd.bdd_not(and_ab);
    let na = dd.bdd_not(x1);
    let nb = dd.bdd_not(x2);
    let right = dd.bdd_or(na, nb);
    assert_eq!(left, right);
}

#[test]
fn and_distributes_over_or() {
    let mut dd = DdManager::new(4);
    let a = dd.ith_var(1).unwrap();
    let b = dd.ith_var(2).unwrap();
    let c = dd.ith_var(3).unwrap();
    let bc = dd.bdd_or(b, c);
    let left = dd.bdd_and(a, bc);
    let ab = dd.bdd_and(a, b);
    let ac = dd.bdd_and(a, c);
    let right = dd.bdd_or(ab, ac);
    assert_eq!(left, right);
}

#[test]
fn shannon_expansion() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let x3 = dd.ith_var(3).unwrap();
    let t = dd.bdd_or(x1, x3);
    let f = dd.bdd_xor(t, x2);
    let v = dd.ith_var(2).unwrap();
    let f1 = dd.bdd_restrict(f, 2, true).unwrap();
    let f0 = dd.bdd_restrict(f, 2, false).unwrap();
    let hi = dd.bdd_and(v, f1);
    let nv = dd.bdd_not(v);
    let lo = dd.bdd_and(nv, f0);
    assert_eq!(dd.bdd_or(hi, lo), f);
}

#[test]
fn ite_terminal_laws() {
    let mut dd = DdManager::new(4);
    let f = dd.ith_var(1).unwrap();
    let g = dd.ith_var(2).unwrap();
    let h = dd.ith_var(3).unwrap();
    let one = dd.one();
    let zero = dd.zero();
    assert_eq!(dd.bdd_ite(one, g, h), g);
    assert_eq!(dd.bdd_ite(zero, g, h), h);
    assert_eq!(dd.bdd_ite(f, g, g), g);
    assert_eq!(dd.bdd_ite(f, one, zero), f);
    assert_eq!(dd.bdd_ite(f, zero, one), dd.bdd_not(f));
}

#[test]
fn ite_matches_its_definition() {
    let mut dd = DdManager::new(4);
    let f = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let x3 = dd.ith_var(3).unwrap();
    let x4 = dd.ith_var(4).unwrap();
    let g = dd.bdd_or(x2, x4);
    let h = dd.bdd_xor(x3, x4);
    let via_ite = dd.bdd_ite(f, g, h);
    let fg = dd.bdd_and(f, g);
    let nf = dd.bdd_not(f);
    let nfh = dd.bdd_and(nf, h);
    assert_eq!(via_ite, dd.bdd_or(fg, nfh));
}

#[test]
fn equal_functions_share_one_handle() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let direct = dd.bdd_and(x1, x2);
    let nx1 = dd.bdd_not(x1);
    let nx2 = dd.bdd_not(x2);
    let nor = dd.bdd_or(nx1, nx2);
    let via_de_morgan = dd.bdd_not(nor);
    let via_ite = dd.bdd_ite(x1, x2, dd.zero());
    assert_eq!(direct, via_de_morgan);
    assert_eq!(direct, via_ite);
}

// manager of N = 4: f = and(x1, x2)
#[test]
fn conjunction_scenario() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let f = dd.bdd_and(x1, x2);
    assert!(dd.bdd_eval(f, &[true, true]));
    assert!(!dd.bdd_eval(f, &[true, false]));
    assert_eq!(dd.count_minterms(f, 4), 4.0);
    assert_eq!(dd.count_nodes(f), 2);
    assert_eq!(dd.bdd_restrict(f, 1, true).unwrap(), x2);
    assert_eq!(dd.bdd_restrict(f, 1, false).unwrap(), dd.zero());
}

// odd parity over three variables
#[test]
fn parity_scenario() {
    let mut dd = DdManager::new(3);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let x3 = dd.ith_var(3).unwrap();
    let t = dd.bdd_xor(x1, x2);
    let g = dd.bdd_xor(t, x3);
    assert_eq!(dd.count_minterms(g, 3), 4.0);
    assert_eq!(dd.bdd_not(dd.bdd_not(g)), g);
    assert!(dd.bdd_eval(g, &[true, false, false]));
    assert!(dd.bdd_eval(g, &[true, true, true]));
    assert!(!dd.bdd_eval(g, &[true, true, false]));
}

#[test]
fn conjunction_is_bracketing_independent() {
    let n = 12;
    let mut dd = DdManager::new(n);
    let vars: Vec<Edge> = (1..=n).map(|i| dd.ith_var(i).unwrap()).collect();
    let mut left = dd.one();
    for &v in &vars {
        left = dd.bdd_and(left, v);
    }
    let mut right = dd.one();
    for &v in vars.iter().rev() {
        right = dd.bdd_and(v, right);
    }
    let mut halves = dd.one();
    for pair in vars.chunks(2) {
        let p = dd.bdd_and(pair[0], pair[1]);
        halves = dd.bdd_and(halves, p);
    }
    assert_eq!(left, right);
    assert_eq!(left, halves);
    assert_eq!(dd.count_nodes(left), n);
    assert_eq!(dd.count_minterms(left, n), 1.0);
}

#[test]
fn quantification() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let f = dd.bdd_and(x1, x2);
    assert_eq!(dd.bdd_exists(f, &[1]).unwrap(), x2);
    assert_eq!(dd.bdd_forall(f, &[1]).unwrap(), dd.zero());
    assert_eq!(dd.bdd_exists(f, &[1, 2]).unwrap(), dd.one());
    assert_eq!(dd.bdd_forall(f, &[1, 2]).unwrap(), dd.zero());
    let g = dd.bdd_or(x1, x2);
    assert_eq!(dd.bdd_forall(g, &[1]).unwrap(), x2);
    // quantifying a variable outside the support changes nothing
    assert_eq!(dd.bdd_exists(f, &[4]).unwrap(), f);
    assert!(dd.bdd_exists(f, &[9]).is_err());
}

#[test]
fn derived_connectives() {
    let mut dd = DdManager::new(3);
    let a = dd.ith_var(1).unwrap();
    let b = dd.ith_var(2).unwrap();
    let na = dd.bdd_not(a);
    let imp = dd.bdd_imp(a, b);
    assert_eq!(imp, dd.bdd_or(na, b));
    let nand = dd.bdd_nand(a, b);
    let and_ab = dd.bdd_and(a, b);
    assert_eq!(nand, dd.bdd_not(and_ab));
    let xnor = dd.bdd_xnor(a, b);
    let xor_ab = dd.bdd_xor(a, b);
    assert_eq!(xnor, dd.bdd_not(xor_ab));
    let nor = dd.bdd_nor(a, b);
    let or_ab = dd.bdd_or(a, b);
    assert_eq!(nor, dd.bdd_not(or_ab));
}

#[test]
fn restrict_rebuilds_below_the_top() {
    let mut dd = DdManager::new(4);
    let x1 = dd.ith_var(1).unwrap();
    let x2 = dd.ith_var(2).unwrap();
    let x3 = dd.ith_var(3).unwrap();
    let t = dd.bdd_and(x2, x3);
    let f = dd.bdd_or(x1, t);
    // restricting x3 under the or keeps the x1 branch intact
    let r = dd.bdd_restrict(f, 3, true).unwrap();
    assert_eq!(r, dd.bdd_or(x1, x2));
    let r = dd.bdd_restrict(f, 3, false).unwrap();
    assert_eq!(r, x1);
}

use std::collections::HashMap;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nj_folding::*;
use nj_structure::PairSet;

const NO_SITES: [&str; 0] = [];

fn random_sequence(rng: &mut StdRng, n: usize) -> String {
    (0..n).map(|_| ['A', 'C', 'G', 'U'][rng.random_range(0..4)]).collect()
}

fn random_site(rng: &mut StdRng, seq: &str) -> String {
    let len = rng.random_range(1..=seq.len().min(4));
    let start = rng.random_range(0..=seq.len() - len);
    seq[start..start + len].to_string()
}

/// Pairwise check, independent of `PairSet::is_secondary_structure`.
fn assert_valid(pairs: &PairSet) {
    let v = pairs.to_tuples();
    for (a, &(i, j)) in v.iter().enumerate() {
        assert!(i < j && j < pairs.length());
        for &(k, l) in &v[a + 1..] {
            assert!(i != k && i != l && j != k && j != l, "shared index in {:?}", v);
            let nested = (i < k && l < j) || (k < i && j < l);
            let disjoint = j < k || l < i;
            assert!(nested || disjoint, "crossing pairs in {:?}", v);
        }
    }
}

/// Reference optimum by exhaustive search: i is unpaired or pairs with some k.
fn brute_force(
    seq: &NucleotideVec,
    policy: ScoringPolicy,
    excluded: &ExcludedIndices,
    min_loop: usize,
) -> Score {
    fn best(
        seq: &NucleotideVec,
        policy: ScoringPolicy,
        excluded: &ExcludedIndices,
        min_loop: usize,
        i: usize,
        j: usize,
        memo: &mut HashMap<(usize, usize), Score>,
    ) -> Score {
        if i >= j {
            return 0;
        }
        if let Some(&s) = memo.get(&(i, j)) {
            return s;
        }
        let mut result = best(seq, policy, excluded, min_loop, i + 1, j, memo);
        for k in i + 1 + min_loop..=j {
            if policy.can_pair(seq, i, k, excluded) {
                let inner = if k > i + 1 { best(seq, policy, excluded, min_loop, i + 1, k - 1, memo) } else { 0 };
                let outer = if k < j { best(seq, policy, excluded, min_loop, k + 1, j, memo) } else { 0 };
                result = result.max(policy.pair_score(seq, i, k) + inner + outer);
            }
        }
        memo.insert((i, j), result);
        result
    }
    best(seq, policy, excluded, min_loop, 0, seq.len() - 1, &mut HashMap::new())
}

fn structure_score(seq: &NucleotideVec, policy: ScoringPolicy, pairs: &PairSet) -> Score {
    pairs.iter()
        .map(|p| policy.pair_score(seq, p.i() as usize, p.j() as usize))
        .sum()
}

#[test]
fn structures_are_valid_and_respect_constraints() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..150 {
        let n = rng.random_range(1..40);
        let seq_str = random_sequence(&mut rng, n);
        let sites = vec![random_site(&mut rng, &seq_str), random_site(&mut rng, &seq_str)];
        let seq = NucleotideVec::try_from(seq_str.as_str()).unwrap();
        for kind in ModelKind::ALL {
            for l in 0..4 {
                let model = FoldingModel::new(kind, l).unwrap();
                let result = model.fold(&seq_str, &sites, false).unwrap();
                let pairs = result.pairs();
                assert_valid(pairs);
                assert!(pairs.is_secondary_structure());
                assert_eq!(pairs.length(), n);

                let expected = if kind.uses_binding_sites() {
                    ExcludedIndices::resolve(&seq, &sites).unwrap()
                } else {
                    ExcludedIndices::none()
                };
                assert_eq!(result.excluded(), &expected);

                for p in pairs.iter() {
                    let (i, j) = (p.i() as usize, p.j() as usize);
                    assert!(seq[i].pairs_with(seq[j]));
                    assert!(j - i - 1 >= model.min_loop_length());
                    assert!(!expected.contains(i) && !expected.contains(j));
                }
                assert_eq!(structure_score(&seq, kind.policy(), pairs), result.score());
            }
        }
    }
}

#[test]
fn classical_pair_count_is_maximal() {
    let mut rng = StdRng::seed_from_u64(11);
    let none = ExcludedIndices::none();
    for _ in 0..200 {
        let n = rng.random_range(1..=12);
        let seq_str = random_sequence(&mut rng, n);
        let seq = NucleotideVec::try_from(seq_str.as_str()).unwrap();
        let pairs = run(ModelKind::Classical, &seq_str, &NO_SITES, false, 0).unwrap();
        let best = brute_force(&seq, ScoringPolicy::Unit, &none, 0);
        assert_eq!(pairs.len() as Score, best, "{}", seq_str);
    }
}

#[test]
fn energy_models_reach_reference_optimum() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..150 {
        let n = rng.random_range(1..=12);
        let seq_str = random_sequence(&mut rng, n);
        let sites = vec![random_site(&mut rng, &seq_str)];
        let seq = NucleotideVec::try_from(seq_str.as_str()).unwrap();
        let excluded = ExcludedIndices::resolve(&seq, &sites).unwrap();
        for l in 0..3 {
            let best = brute_force(&seq, ScoringPolicy::Energy, &excluded, l);
            let standard = FoldingModel::binding_energy(l).fold(&seq_str, &sites, false).unwrap();
            let alternative = FoldingModel::binding_energy_alt_tb(l).fold(&seq_str, &sites, false).unwrap();
            assert_eq!(standard.score(), best);
            assert_eq!(structure_score(&seq, ScoringPolicy::Energy, standard.pairs()), best);
            assert_eq!(structure_score(&seq, ScoringPolicy::Energy, alternative.pairs()), best);
        }
    }
}

#[test]
fn tracebacks_are_among_all_optima() {
    let mut rng = StdRng::seed_from_u64(17);
    let none = ExcludedIndices::none();
    for _ in 0..60 {
        let n = rng.random_range(2..=10);
        let seq = NucleotideVec::try_from(random_sequence(&mut rng, n).as_str()).unwrap();
        for policy in [ScoringPolicy::Unit, ScoringPolicy::Energy] {
            let rec = Recurrence::new(&seq, policy, &none, 1);
            let table = rec.fill();
            let all = enumerate_optimal(&table, &rec).unwrap();
            for mode in [TracebackMode::Standard, TracebackMode::Alternative] {
                let pairs = traceback(&table, &rec, mode).unwrap();
                assert!(all.contains(&pairs), "{} {:?}", seq, mode);
            }
        }
    }
}

#[test]
fn larger_loop_length_never_adds_pairs() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..100 {
        let n = rng.random_range(1..50);
        let seq_str = random_sequence(&mut rng, n);
        let mut previous = usize::MAX;
        for l in 0..8 {
            let count = run(ModelKind::ClassicalMll, &seq_str, &NO_SITES, false, l).unwrap().len();
            assert!(count <= previous, "{} at L={}", seq_str, l);
            previous = count;
        }
    }
}

#[test]
fn folding_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..50 {
        let n = rng.random_range(1..60);
        let seq_str = random_sequence(&mut rng, n);
        let sites = vec![random_site(&mut rng, &seq_str)];
        for kind in ModelKind::ALL {
            let a = run(kind, &seq_str, &sites, false, 2).unwrap();
            let b = run(kind, &seq_str, &sites, true, 2).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.to_tuples(), b.to_tuples());
        }
    }
}

#[test]
fn scenario_classical_hairpin() {
    let pairs = run(ModelKind::Classical, "GGGAAAUCC", &NO_SITES, false, 0).unwrap();
    assert_eq!(pairs.to_tuples(), vec![(1, 8), (2, 7), (5, 6)]);
    assert!(pairs.iter().any(|p| p.j() == 8));
}

#[test]
fn scenario_poly_a() {
    for kind in ModelKind::ALL {
        for l in 0..5 {
            assert!(run(kind, "AAAA", &NO_SITES, false, l).unwrap().is_empty());
        }
    }
}

#[test]
fn scenario_observed_structure_accuracy() {
    let observed = PairSet::from_annotation("(.(..)).").unwrap();
    assert_eq!(observed.to_tuples(), vec![(0, 6), (2, 5)]);
    let predicted = PairSet::from_annotation("..(..)..").unwrap();
    assert_eq!(accuracy(&observed, &predicted), 0.5);
}

#[test]
fn scenario_long_sequence() {
    // Traceback uses a work-list, long sequences do not recurse deeply.
    let seq_str = format!("{}{}{}", "G".repeat(150), "A".repeat(4), "C".repeat(150));
    let pairs = run(ModelKind::BindingEnergyAltTb, &seq_str, &NO_SITES, false, 3).unwrap();
    assert_eq!(pairs.len(), 150);
    assert!(pairs.is_secondary_structure());
}

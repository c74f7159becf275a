use std::time::Instant;

use shelfmine::{encode_baskets, generate_rules, mine_frequent_itemsets, Thresholds};

/// Synthetic baskets: a few hot categories plus a long tail, with a
/// planted co-borrowed group so deeper levels are reached.
fn synth_baskets(n_txn: usize, n_items: usize, seed: u64) -> Vec<Vec<String>> {
    let mut state = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..n_txn)
        .map(|_| {
            let mut basket = Vec::new();
            for item in 0..n_items {
                // item i kept with probability ~ 1 / (2 + i / 4)
                if next() % (2 + item as u64 / 4) == 0 {
                    basket.push(format!("cat{item:03}"));
                }
            }
            if next() % 5 == 0 {
                basket.extend(["planted_a", "planted_b", "planted_c"].map(String::from));
            }
            basket
        })
        .collect()
}

fn main() {
    for &(n_txn, n_items, min_support) in &[
        (10_000usize, 40usize, 0.05f64),
        (50_000, 60, 0.03),
        (100_000, 80, 0.02),
    ] {
        let baskets = synth_baskets(n_txn, n_items, 0x9e37_79b9_7f4a_7c15);

        let t0 = Instant::now();
        let matrix = encode_baskets(&baskets);
        let t_encode = t0.elapsed();

        let t1 = Instant::now();
        let thresholds = Thresholds::new(min_support, 0.1);
        let frequent = mine_frequent_itemsets(&matrix, &thresholds).expect("valid thresholds");
        let t_mine = t1.elapsed();

        let t2 = Instant::now();
        let rules = generate_rules(&frequent).expect("downward closed");
        let t_rules = t2.elapsed();

        println!(
            "txn={n_txn:>7} items={n_items:>3} minsup={min_support:.2}  encode {:>8.2?}  apriori {:>8.2?} ({} sets, depth {})  rules {:>8.2?} ({})",
            t_encode,
            t_mine,
            frequent.len(),
            frequent.max_level(),
            t_rules,
            rules.len(),
        );
    }
}

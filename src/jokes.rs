// src/jokes.rs
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const KIWI_JOKES: [&str; 3] = [
    "Why did the tuatara ace maths? It always kept its *scale* in balance!",
    "What do you call an all-black beetle? A **rug-bug**!",
    "How do Kiwis start a race? ‘Ready, set, *chur*!’",
];

/// Success payload of the `tell_kiwi_joke` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KiwiJoke {
    pub joke: String,
}

pub fn pick_joke<R: Rng + ?Sized>(rng: &mut R) -> KiwiJoke {
    let idx = rng.random_range(0..KIWI_JOKES.len());
    KiwiJoke {
        joke: KIWI_JOKES[idx].to_string(),
    }
}

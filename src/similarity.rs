//! Lexical similarity via block matching
//!
//! Ratio of matched character runs to total compared length: `2*M / T`, where `M` is the
//! size of all matching blocks found by recursively taking the longest common substring
//! and `T` is the combined length of both strings (in `char`s).
//!
//! Long second sequences (200+ chars) get the "autojunk" treatment: characters occurring
//! more than 1% + 1 times never seed a match, although they can still extend one.

use std::collections::{HashMap, HashSet};

const AUTOJUNK_MIN_LEN: usize = 200;

/// Similarity of `a` to `b` in [0.0, 1.0] with autojunk enabled
pub fn ratio(a: &str, b: &str) -> f64 {
	SequenceMatcher::new(a, b).ratio()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
	pub a: usize,
	pub b: usize,
	pub size: usize,
}

pub struct SequenceMatcher {
	a: Vec<char>,
	b: Vec<char>,
	b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
	pub fn new(a: &str, b: &str) -> Self {
		Self::with_autojunk(a, b, true)
	}

	pub fn with_autojunk(a: &str, b: &str, autojunk: bool) -> Self {
		let a: Vec<char> = a.chars().collect();
		let b: Vec<char> = b.chars().collect();
		let b2j = index_b(&b, autojunk);
		Self { a, b, b2j }
	}

	pub fn ratio(&self) -> f64 {
		let total = self.a.len() + self.b.len();
		if total == 0 {
			return 1.0;
		}
		let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
		2.0 * matches as f64 / total as f64
	}

	/// Non-overlapping matching blocks, ordered by position
	pub fn matching_blocks(&self) -> Vec<Block> {
		let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
		let mut blocks = Vec::new();

		while let Some((alo, ahi, blo, bhi)) = queue.pop() {
			let m = self.find_longest_match(alo, ahi, blo, bhi);
			if m.size == 0 {
				continue;
			}
			if alo < m.a && blo < m.b {
				queue.push((alo, m.a, blo, m.b));
			}
			if m.a + m.size < ahi && m.b + m.size < bhi {
				queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
			}
			blocks.push(m);
		}

		blocks.sort_by_key(|m| (m.a, m.b));
		blocks
	}

	/// Longest matching block in `a[alo..ahi]` / `b[blo..bhi]`; earliest in `a`, then `b`, wins ties
	pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
		let (a, b) = (&self.a, &self.b);
		let mut best = Block { a: alo, b: blo, size: 0 };
		let mut j2len: HashMap<usize, usize> = HashMap::new();

		for i in alo..ahi {
			let mut next: HashMap<usize, usize> = HashMap::new();
			if let Some(indices) = self.b2j.get(&a[i]) {
				for &j in indices {
					if j < blo {
						continue;
					}
					if j >= bhi {
						break;
					}
					let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
					next.insert(j, k);
					if k > best.size {
						best = Block { a: i + 1 - k, b: j + 1 - k, size: k };
					}
				}
			}
			j2len = next;
		}

		// Popular characters never seed a match but may extend one
		while best.a > alo && best.b > blo && a[best.a - 1] == b[best.b - 1] {
			best.a -= 1;
			best.b -= 1;
			best.size += 1;
		}
		while best.a + best.size < ahi && best.b + best.size < bhi && a[best.a + best.size] == b[best.b + best.size] {
			best.size += 1;
		}

		best
	}
}

fn index_b(b: &[char], autojunk: bool) -> HashMap<char, Vec<usize>> {
	let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
	for (j, &c) in b.iter().enumerate() {
		b2j.entry(c).or_default().push(j);
	}

	if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
		let threshold = b.len() / 100 + 1;
		let popular: HashSet<char> = b2j
			.iter()
			.filter(|(_, idx)| idx.len() > threshold)
			.map(|(&c, _)| c)
			.collect();
		b2j.retain(|c, _| !popular.contains(c));
	}

	b2j
}

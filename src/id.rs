use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random base-36 fragment appended to every prefix.
pub const FRAGMENT_LEN: usize = 9;

/// Produces identifiers of the form `{prefix}_{fragment}` for nodes, edges and processes.
///
/// Every id handed out (or registered through [`IdGenerator::reserve`]) is remembered, so a
/// single generator never returns the same value twice even in the unlikely event of a
/// fragment collision.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
    issued: AHashSet<String>,
}

impl IdGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates a deterministic generator. Intended for tests and reproducible tooling.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            issued: AHashSet::new(),
        }
    }

    /// Returns an id that this generator has not returned or reserved before.
    pub fn new_id(&mut self, prefix: &str) -> String {
        loop {
            let id = format!("{}_{}", prefix, random_fragment(&mut self.rng));
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Marks externally created ids (e.g. from a loaded process) as taken.
    pub fn reserve<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issued.extend(ids.into_iter().map(Into::into));
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off id using the thread-local generator, for callers without a session.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, random_fragment(&mut rand::rng()))
}

fn random_fragment<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..FRAGMENT_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

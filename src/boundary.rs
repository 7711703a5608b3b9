use ::bytes::Bytes;
use ::rand::Rng;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;

const BOUNDARY_PREFIX: &str = "--------------------------";
const BOUNDARY_RANDOM_DIGITS: usize = 24;

///
/// The delimiter separating each part of a multipart body.
///
/// Boundaries are 26 dashes followed by 24 random hex digits,
/// 50 characters in total. This matches the shape browsers use,
/// and is long enough that it will not turn up inside uploaded content.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary {
    inner: String,
}

impl Boundary {
    /// Generates a new boundary using the thread local random number generator.
    pub fn generate() -> Self {
        Self::generate_with(&mut ::rand::thread_rng())
    }

    /// Generates a new boundary using the random number generator given.
    ///
    /// Passing a seeded generator gives the same boundary every time.
    pub fn generate_with<R>(rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mut inner = String::with_capacity(BOUNDARY_PREFIX.len() + BOUNDARY_RANDOM_DIGITS);
        inner.push_str(BOUNDARY_PREFIX);

        for _ in 0..BOUNDARY_RANDOM_DIGITS {
            let digit = rng.gen_range(0..16);
            let digit_char = char::from_digit(digit, 16).unwrap_or('0');
            inner.push(digit_char);
        }

        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// The closing line written once every part has been sent, `--{boundary}--\r\n`.
    pub(crate) fn end_line(&self) -> Bytes {
        Bytes::from(format!("--{}--\r\n", self.inner))
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.inner)
    }
}

impl AsRef<str> for Boundary {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

//! Text form of a `GrowVec`: `[a, b, c]` out, whitespace-separated tokens in.

use core::fmt;
use core::str::FromStr;

use crate::core::GrowVec;
use crate::error::ReadTokensError;

impl<T: fmt::Display> fmt::Display for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        f.write_str("]")
    }
}

impl<T: FromStr> GrowVec<T> {
    /// Clears the vector, then appends every whitespace-separated token of `input`.
    ///
    /// Reading stops at the first token that does not parse; the elements
    /// read before it stay in the vector. Returns the number of elements read.
    ///
    /// # Errors
    ///
    /// - `ReadTokensError::Parse` with the index and `FromStr` error of the bad token
    /// - `ReadTokensError::Storage` if the vector cannot grow
    pub fn read_tokens(&mut self, input: &str) -> Result<usize, ReadTokensError<T::Err>> {
        self.clear();
        for (index, token) in input.split_whitespace().enumerate() {
            let item = token
                .parse::<T>()
                .map_err(|reason| ReadTokensError::Parse { index, reason })?;
            self.push(item)?;
        }
        Ok(self.len())
    }
}

impl<T: FromStr> FromStr for GrowVec<T> {
    type Err = ReadTokensError<T::Err>;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut vec = GrowVec::new();
        vec.read_tokens(input)?;
        Ok(vec)
    }
}

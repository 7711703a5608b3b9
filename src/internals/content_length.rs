/// The `\r\n` written after the contents of every part.
const PART_END_PADDING: u64 = 2;

///
/// Tracks the total length of a multipart body as parts are added.
///
/// The total is only known whilst every part has a known size.
/// Adding a stream without a size makes it unknown, until a total
/// for those streams is given with [`ContentLength::override_total`].
///
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLength {
    known_size: u64,
    unsized_streams_overhead: u64,
    declared_unsized_total: u64,
    end_boundary_size: u64,
    is_all_known: bool,
}

impl ContentLength {
    pub fn new(end_boundary_size: u64) -> Self {
        Self {
            known_size: 0,
            unsized_streams_overhead: 0,
            declared_unsized_total: 0,
            end_boundary_size,
            is_all_known: true,
        }
    }

    pub fn add_known_size(&mut self, size: u64) {
        self.known_size += size;
    }

    /// Adds a part whose contents are known, including its leading block and end padding.
    pub fn add_known_part(&mut self, leading_size: u64, contents_size: u64) {
        self.add_known_size(leading_size + contents_size + PART_END_PADDING);
    }

    pub fn mark_unknown(&mut self) {
        self.is_all_known = false;
    }

    /// Records a stream with no declared size.
    ///
    /// Its leading block and end padding are still counted,
    /// so that an override only needs to supply the stream contents.
    pub fn add_unsized_stream(&mut self, leading_size: u64) {
        self.unsized_streams_overhead += leading_size + PART_END_PADDING;
        self.mark_unknown();
    }

    /// Sets the total size of the contents of all streams added without a size.
    ///
    /// This does nothing if every part already has a known size.
    /// Returns true if the override was used.
    pub fn override_total(&mut self, declared_total: u64) -> bool {
        if self.is_all_known {
            return false;
        }

        self.declared_unsized_total = declared_total;
        self.is_all_known = true;
        true
    }

    /// Returns if the total is known, and the total.
    ///
    /// When it is not known the total is only the parts counted so far.
    pub fn finalize(&self) -> (bool, u64) {
        let mut total = self.known_size + self.unsized_streams_overhead + self.end_boundary_size;
        if self.is_all_known {
            total += self.declared_unsized_total;
        }

        (self.is_all_known, total)
    }

    pub fn total(&self) -> Option<u64> {
        match self.finalize() {
            (true, total) => Some(total),
            (false, _) => None,
        }
    }
}

#[cfg(test)]
mod test_new {
    use super::*;

    #[test]
    fn it_should_start_known_with_end_boundary_only() {
        let content_length = ContentLength::new(56);

        assert_eq!(content_length.finalize(), (true, 56));
    }
}

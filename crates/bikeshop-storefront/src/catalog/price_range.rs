/// Price bounds for a listing filter.
///
/// Edits go through [`PriceRange::set_min`] / [`PriceRange::set_max`], which
/// clamp so that `min < max` holds after every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Builds a range, pushing `max` above `min` if needed.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        let max = if max > min { max } else { min.saturating_add(1) };
        Self { min, max }
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// `min = max(0, min(value, max - 1))`.
    pub fn set_min(&mut self, value: i64) {
        let ceiling = i64::from(self.max) - 1;
        let clamped = value.min(ceiling).max(0);
        self.min = u32::try_from(clamped).unwrap_or(0);
    }

    /// `max = max(value, min + 1)`.
    pub fn set_max(&mut self, value: i64) {
        let floor = i64::from(self.min) + 1;
        let clamped = value.max(floor);
        self.max = u32::try_from(clamped).unwrap_or(u32::MAX);
    }

    /// Applies raw text from a min-price input. Unparsable text counts as 0.
    pub fn set_min_input(&mut self, raw: &str) {
        self.set_min(parse_leading_int(raw));
    }

    /// Applies raw text from a max-price input. Unparsable text counts as 0.
    pub fn set_max_input(&mut self, raw: &str) {
        self.set_max(parse_leading_int(raw));
    }
}

/// Integer prefix of `raw` (`"120abc"` → 120, `"-5"` → -5), or 0.
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_cannot_reach_max() {
        let mut range = PriceRange::new(499, 1799);
        range.set_min(5000);
        assert_eq!(range.min(), 1798);
        range.set_min(-20);
        assert_eq!(range.min(), 0);
    }

    #[test]
    fn max_cannot_drop_to_min() {
        let mut range = PriceRange::new(499, 1799);
        range.set_max(100);
        assert_eq!(range.max(), 500);
    }

    #[test]
    fn invariant_holds_across_edit_sequences() {
        let edits: [(bool, i64); 8] = [
            (true, 2000),
            (false, 0),
            (true, -1),
            (false, 3),
            (true, 3),
            (false, 3),
            (true, i64::MAX),
            (false, i64::MIN),
        ];
        let mut range = PriceRange::new(0, 5000);
        for (is_min, value) in edits {
            if is_min {
                range.set_min(value);
            } else {
                range.set_max(value);
            }
            assert!(range.min() < range.max(), "{range:?}");
        }
    }

    #[test]
    fn raw_input_uses_integer_prefix() {
        let mut range = PriceRange::new(0, 5000);
        range.set_min_input("120.75");
        assert_eq!(range.min(), 120);
        range.set_min_input("abc");
        assert_eq!(range.min(), 0);
        range.set_max_input("");
        assert_eq!(range.max(), 1);
    }

    #[test]
    fn new_repairs_inverted_bounds() {
        let range = PriceRange::new(10, 10);
        assert_eq!((range.min(), range.max()), (10, 11));
    }
}

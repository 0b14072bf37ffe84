use std::cmp::Ordering;

#[derive(PartialEq)]
pub struct OrdWrapper<'a, T: PartialOrd>(pub &'a T);

impl<'a, T: PartialOrd> Eq for OrdWrapper<'a, T> {}

impl<'a, T: PartialOrd> PartialOrd for OrdWrapper<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, T: PartialOrd> Ord for OrdWrapper<'a, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(other.0).unwrap_or(Ordering::Equal)
    }
}

/// Index of the smallest element. On ties the first one wins.
pub fn argmin<T: PartialOrd>(iter: impl Iterator<Item = T>) -> Option<usize> {
    iter.enumerate()
        .min_by(|(_, a), (_, b)| OrdWrapper(a).cmp(&OrdWrapper(b)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn argmin_first() {
        assert_eq!(argmin([3.0, 1.0, 2.0, 1.0].iter()), Some(1));
        assert_eq!(argmin([2.0f64].iter()), Some(0));
        assert_eq!(argmin(std::iter::empty::<f64>()), None);
    }
}

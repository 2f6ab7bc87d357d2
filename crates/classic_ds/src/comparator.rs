use std::cmp::Ordering;
use std::fmt;

enum CompareFn<T> {
    Ptr(fn(&T, &T) -> Ordering),
    Boxed(Box<dyn Fn(&T, &T) -> Ordering>),
}

/// Three-way ordering shared by every ordered structure in the crate.
///
/// A comparator is either the natural order of `T` (the default) or a custom
/// function. [`Comparator::reverse`] flips it in place.
pub struct Comparator<T> {
    compare: CompareFn<T>,
    is_default: bool,
    reversed: bool,
}

impl<T: Ord> Comparator<T> {
    pub fn natural() -> Self {
        Self {
            compare: CompareFn::Ptr(<T as Ord>::cmp),
            is_default: true,
            reversed: false,
        }
    }
}

impl<T: Ord> Default for Comparator<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> Comparator<T> {
    pub fn from_fn<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            compare: CompareFn::Boxed(Box::new(compare)),
            is_default: false,
            reversed: false,
        }
    }

    /// Same as [`Comparator::from_fn`], without boxing. Usable for `T` that
    /// are not `'static`.
    pub fn from_fn_ptr(compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            compare: CompareFn::Ptr(compare),
            is_default: false,
            reversed: false,
        }
    }

    /// `true` unless the comparator was built from a custom function.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let (a, b) = if self.reversed { (b, a) } else { (a, b) };
        match &self.compare {
            CompareFn::Ptr(f) => f(a, b),
            CompareFn::Boxed(f) => f(a, b),
        }
    }

    pub fn equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    pub fn less_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub fn greater_than(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    pub fn less_than_or_equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    pub fn greater_than_or_equal(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("is_default", &self.is_default)
            .field("reversed", &self.reversed)
            .finish_non_exhaustive()
    }
}

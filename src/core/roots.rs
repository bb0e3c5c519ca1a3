//! Reduce a sequence of items to its topmost "roots" under a caller-supplied
//! descendant relation. The result never holds two items where one is a
//! descendant of the other.

/// Incremental accumulator of roots.
///
/// `is_descendant(a, b)` must answer "is `a` a descendant of `b`".
pub struct RootSet<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    roots: Vec<T>,
    is_descendant: F,
}

impl<T, F> RootSet<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(is_descendant: F) -> Self
    {
        Self { roots: Vec::new(), is_descendant }
    }

    /// Offer `item`. Returns `false` when an existing root already covers it.
    /// Otherwise every root it covers is dropped and `item` is appended.
    pub fn push(
        &mut self,
        item: T,
    ) -> bool
    {
        let is_descendant = &self.is_descendant;

        if self
            .roots
            .iter()
            .any(|root| is_descendant(&item, root))
        {
            return false;
        }

        self.roots
            .retain(|root| !is_descendant(root, &item));
        self.roots
            .push(item);

        true
    }

    pub fn roots(&self) -> &[T]
    {
        &self.roots
    }

    pub fn len(&self) -> usize
    {
        self.roots
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.roots
            .is_empty()
    }

    pub fn into_vec(self) -> Vec<T>
    {
        self.roots
    }
}

impl<T, F> Extend<T> for RootSet<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn extend<I: IntoIterator<Item = T>>(
        &mut self,
        iter: I,
    )
    {
        for item in iter
        {
            self.push(item);
        }
    }
}

/// Fold `items` left to right into their roots.
///
/// Order of the result is the order in which surviving items were appended.
pub fn reduce_roots<T, I, F>(
    items: I,
    is_descendant: F,
) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T, &T) -> bool,
{
    let mut set = RootSet::new(is_descendant);
    set.extend(items);
    set.into_vec()
}

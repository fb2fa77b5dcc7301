//! A `Vec` that is iterated from the last to the first pushed element.

/// A `Vec` that is iterated from the last to the first pushed element.
///
/// The nth element of a `Stack` is the nth-*last* pushed element.
/// This is the order in which de Bruijn indices refer to binders:
/// if we push the values of the binders `x1, ..., xn` in this order,
/// then the value of the variable with index `i` is the ith element of the stack.
#[derive(Clone, Debug)]
pub struct Stack<A>(Vec<A>);

impl<A> Stack<A> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an element to the top of the stack.
    pub fn push(&mut self, x: A) {
        self.0.push(x)
    }

    /// Return the number of elements on the stack.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the stack contains no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Obtain the nth element counted from the top of the stack.
    ///
    /// ~~~
    /// # use kosimp::Stack;
    /// let mut s = Stack::new();
    /// s.push('a');
    /// s.push('b');
    /// assert_eq!(s.get(0), Some(&'b'));
    /// assert_eq!(s.get(1), Some(&'a'));
    /// assert_eq!(s.get(2), None);
    /// ~~~
    pub fn get(&self, n: usize) -> Option<&A> {
        self.0.len().checked_sub(n + 1).map(|i| &self.0[i])
    }
}

impl<A> Default for Stack<A> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<A> From<Vec<A>> for Stack<A> {
    fn from(v: Vec<A>) -> Self {
        Self(v)
    }
}

impl<A> FromIterator<A> for Stack<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

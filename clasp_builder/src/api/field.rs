use std::cell::RefCell;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::api::capture::*;
use crate::model::Arity;
use crate::prelude::Collectable;

/// A parameter that takes a single value, which overwrites the variable.
/// Matching it twice is an error.
pub struct Scalar<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
}

impl<'a, T> CliOption for Scalar<'a, T> {}
impl<'a, T> CliArgument for Scalar<'a, T> {}

impl<'a, T> Scalar<'a, T> {
    /// Create a scalar parameter.
    /// The variable's current value is the default.
    pub fn new(variable: &'a mut T) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Scalar<'a, T> {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, value: T) {
        **self.variable.borrow_mut() = value;
    }

    fn arity(&self) -> Arity {
        Arity::Single
    }
}

/// A boolean parameter that takes no value.
/// Its presence flips the variable away from its initial value.
pub struct Switch<'a> {
    variable: Rc<RefCell<&'a mut bool>>,
}

impl<'a> CliOption for Switch<'a> {}

impl<'a> Switch<'a> {
    /// Create a switch parameter.
    /// The variable's current value is the default.
    pub fn new(variable: &'a mut bool) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a> GenericCapturable<'a, bool> for Switch<'a> {
    fn matched(&mut self) {
        let mut variable = self.variable.borrow_mut();
        **variable = !**variable;
    }

    fn capture(&mut self, _value: bool) {
        unreachable!("internal error - must not capture on a Switch");
    }

    fn arity(&self) -> Arity {
        Arity::Switch
    }
}

/// A parameter that maps down to [`Option`], taking a single value.
pub struct Optional<'a, T> {
    variable: Rc<RefCell<&'a mut Option<T>>>,
}

impl<'a, T> CliOption for Optional<'a, T> {}

impl<'a, T> Optional<'a, T> {
    /// Create an optional parameter.
    pub fn new(variable: &'a mut Option<T>) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
        }
    }
}

impl<'a, T> GenericCapturable<'a, T> for Optional<'a, T> {
    fn matched(&mut self) {
        // Do nothing
    }

    fn capture(&mut self, value: T) {
        self.variable.borrow_mut().replace(value);
    }

    fn arity(&self) -> Arity {
        Arity::Single
    }
}

/// A parameter that takes one value per occurrence, accumulating them into a collection.
pub struct Collection<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    variable: Rc<RefCell<&'a mut C>>,
    _phantom: PhantomData<T>,
}

impl<'a, C, T> CliOption for Collection<'a, C, T> where C: 'a + Collectable<T> {}

impl<'a, C, T> CliArgument for Collection<'a, C, T> where C: 'a + Collectable<T> {}

impl<'a, C, T> Collection<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    /// Create a collection parameter.
    /// Values are added to whatever the collection already holds.
    pub fn new(variable: &'a mut C) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            _phantom: PhantomData,
        }
    }
}

impl<'a, C, T> GenericCapturable<'a, T> for Collection<'a, C, T>
where
    C: 'a + Collectable<T>,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, value: T) {
        (**self.variable.borrow_mut()).add(value);
    }

    fn arity(&self) -> Arity {
        Arity::Multiple
    }
}

impl<T> Collectable<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + std::hash::Hash> Collectable<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec() {
        let mut collection: Vec<u32> = Vec::default();
        collection.add(1);
        collection.add(0);
        assert_eq!(collection, vec![1, 0]);
    }

    #[test]
    fn hash_set() {
        let mut collection: HashSet<u32> = HashSet::default();
        collection.add(1);
        collection.add(0);
        collection.add(1);
        assert_eq!(collection, HashSet::from([1, 0]));
    }

    #[test]
    fn scalar_capture() {
        let mut variable: u32 = u32::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.capture(5);
        scalar.capture(7);
        drop(scalar);
        assert_eq!(variable, 7);
    }

    #[test]
    #[should_panic]
    fn switch_capture() {
        let mut variable: bool = false;
        let mut switch = Switch::new(&mut variable);
        switch.capture(true);
    }

    #[test]
    fn optional_capture() {
        let mut variable: Option<u32> = None;
        let mut optional = Optional::new(&mut variable);
        optional.capture(1);
        drop(optional);
        assert_eq!(variable, Some(1));
    }

    #[test]
    fn collection_capture() {
        // Vec<u32>
        let mut variable: Vec<u32> = vec![9];
        let mut collection = Collection::new(&mut variable);
        collection.capture(1);
        collection.capture(0);
        drop(collection);
        assert_eq!(variable, vec![9, 1, 0]);

        // HashSet<u32>
        let mut variable: HashSet<u32> = HashSet::default();
        let mut collection = Collection::new(&mut variable);
        collection.capture(1);
        collection.capture(0);
        collection.capture(0);
        drop(collection);
        assert_eq!(variable, HashSet::from([0, 1]));
    }

    #[test]
    fn scalar_matched() {
        let mut variable: u32 = u32::default();
        let mut scalar = Scalar::new(&mut variable);
        scalar.matched();
        drop(scalar);
        assert_eq!(variable, 0);
    }

    #[test]
    fn switch_matched() {
        let mut variable: bool = false;
        let mut switch = Switch::new(&mut variable);
        switch.matched();
        drop(switch);
        assert!(variable);

        // A default of true flips to false.
        let mut variable: bool = true;
        let mut switch = Switch::new(&mut variable);
        switch.matched();
        drop(switch);
        assert!(!variable);
    }

    #[test]
    fn optional_matched() {
        let mut variable: Option<u32> = None;
        let mut optional = Optional::new(&mut variable);
        optional.matched();
        drop(optional);
        assert_eq!(variable, None);
    }

    #[test]
    fn test_arity() {
        let mut variable: u32 = u32::default();
        let scalar = Scalar::new(&mut variable);
        assert_eq!(scalar.arity(), Arity::Single);

        let mut variable: bool = false;
        let switch = Switch::new(&mut variable);
        assert_eq!(switch.arity(), Arity::Switch);

        let mut variable: Option<u32> = None;
        let optional = Optional::new(&mut variable);
        assert_eq!(optional.arity(), Arity::Single);

        let mut variable: Vec<u32> = Vec::default();
        let collection = Collection::new(&mut variable);
        assert_eq!(collection.arity(), Arity::Multiple);
    }
}

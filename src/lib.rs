#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

use core::fmt;
use core::iter::FusedIterator;
use allocator::Allocator;
use allocator::Global;
use store::Node;
use store::NodeRef;
use store::Store;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

pub mod allocator;

mod store;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly-linked list with O(1) access to both ends.
///
/// Elements live in a slab owned by the list and are chained through
/// integer handles, head to tail. The tail handle is non-owning and makes
/// `push_back` O(1); positional operations walk `next` links from the head.

pub struct List<T, A: Allocator = Global> {
  len: usize,
  head: Option<NodeRef>,
  tail: Option<NodeRef>,
  store: Store<T, A>,
}

/// The error returned by the `try_` access methods and by
/// [`insert`](List::insert) when an index is out of range.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexError;

/// An iterator over the elements of a [`List`], head to tail.

pub struct Iter<'a, T, A: Allocator = Global> {
  store: &'a Store<T, A>,
  cursor: Option<NodeRef>,
  remaining: usize,
}

/// An owning iterator over the elements of a [`List`], head to tail.

pub struct IntoIter<T, A: Allocator = Global>(List<T, A>);

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Error {
  Empty,
  OutOfBounds { index: usize, len: usize },
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::Empty =>
        panic!("oxtail: attempted to access an element of an empty list!"),
      Error::OutOfBounds { index, len } =>
        panic!("oxtail: index {} is out of bounds for a list of length {}!", index, len),
    }
  }
}

impl Fail for IndexError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(IndexError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// IndexError                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for IndexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("index out of range")
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

// Walks `next` links from the head. Yields `None` when `index` is at or
// past the end of the chain, so callers get their bounds check for free.

#[inline(always)]
fn node_at<T, A>(list: &List<T, A>, index: usize) -> Option<NodeRef>
where
  A: Allocator
{
  let mut cursor = list.head;

  for _ in 0 .. index {
    cursor = list.store.node(cursor?).next;
  }

  cursor
}

fn at<T, A, E>(list: &List<T, A>, index: usize) -> Result<&T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(r) = node_at(list, index) else {
    return E::fail(Error::OutOfBounds { index, len: list.len });
  };

  Ok(&list.store.node(r).value)
}

fn at_mut<T, A, E>(list: &mut List<T, A>, index: usize) -> Result<&mut T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(r) = node_at(list, index) else {
    return E::fail(Error::OutOfBounds { index, len: list.len });
  };

  Ok(&mut list.store.node_mut(r).value)
}

fn front<T, A, E>(list: &List<T, A>) -> Result<&T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(r) = list.head else {
    return E::fail(Error::Empty);
  };

  Ok(&list.store.node(r).value)
}

fn back<T, A, E>(list: &List<T, A>) -> Result<&T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(r) = list.tail else {
    return E::fail(Error::Empty);
  };

  Ok(&list.store.node(r).value)
}

fn pop_front<T, A, E>(list: &mut List<T, A>) -> Result<T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(head) = list.head else {
    return E::fail(Error::Empty);
  };

  let node = list.store.remove(head);
  list.head = node.next;
  if node.next.is_none() {
    list.tail = None;
  }
  list.len = list.len - 1;
  Ok(node.value)
}

fn pop_back<T, A, E>(list: &mut List<T, A>) -> Result<T, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(mut cursor) = list.head else {
    return E::fail(Error::Empty);
  };

  // The chain has no back links, so walk to the last node while
  // remembering its predecessor.

  let mut prev = None;

  while let Some(next) = list.store.node(cursor).next {
    prev = Some(cursor);
    cursor = next;
  }

  let node = list.store.remove(cursor);
  match prev {
    Some(p) => list.store.node_mut(p).next = None,
    None => list.head = None,
  }
  list.tail = prev;
  list.len = list.len - 1;
  Ok(node.value)
}

fn erase<T, A, E>(list: &mut List<T, A>, index: usize) -> Result<T, E>
where
  A: Allocator,
  E: Fail,
{
  if index == 0 {
    return pop_front(list);
  }

  let Some(prev) = node_at(list, index - 1) else {
    return E::fail(Error::OutOfBounds { index, len: list.len });
  };
  let Some(target) = list.store.node(prev).next else {
    return E::fail(Error::OutOfBounds { index, len: list.len });
  };

  let node = list.store.remove(target);
  list.store.node_mut(prev).next = node.next;
  if node.next.is_none() {
    list.tail = Some(prev);
  }
  list.len = list.len - 1;
  Ok(node.value)
}

fn insert<T, A>(list: &mut List<T, A>, value: T, index: usize) -> Result<(), IndexError>
where
  A: Allocator
{
  if index > list.len {
    return Err(IndexError);
  }

  if index == 0 {
    list.push_front(value);
    return Ok(());
  }

  if index == list.len {
    list.push_back(value);
    return Ok(());
  }

  let Some(prev) = node_at(list, index - 1) else {
    return Err(IndexError);
  };

  let next = list.store.node(prev).next;
  let node = list.store.insert(Node { value, next });
  list.store.node_mut(prev).next = Some(node);
  list.len = list.len + 1;
  Ok(())
}

impl<T> List<T> {
  /// Creates an empty list.

  pub fn new() -> Self {
    Self::new_in(Global)
  }

  /// Creates an empty list with room for `capacity` elements before the
  /// node store reallocates.

  pub fn with_capacity(capacity: usize) -> Self {
    Self::with_capacity_in(capacity, Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Creates an empty list backed by the given allocator.

  pub fn new_in(allocator: A) -> Self {
    Self::with_capacity_in(0, allocator)
  }

  /// Creates an empty list with room for `capacity` elements, backed by
  /// the given allocator.

  pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    Self {
      len: 0,
      head: None,
      tail: None,
      store: Store::with_capacity_in(capacity, allocator),
    }
  }

  /// True iff the list holds no elements.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// The number of elements in the list.

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.len
  }

  /// A reference to the parent allocator.

  pub fn allocator(&self) -> &A {
    self.store.allocator()
  }

  /// A reference to the element at `index`, counting from the head.
  /// Costs O(`index`).
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of bounds.

  pub fn at(&self, index: usize) -> &T {
    unwrap(at(self, index))
  }

  /// A reference to the element at `index`, counting from the head.
  /// Costs O(`index`).
  ///
  /// # Errors
  ///
  /// An error is returned when `index` is out of bounds.

  pub fn try_at(&self, index: usize) -> Result<&T, IndexError> {
    at(self, index)
  }

  /// A mutable reference to the element at `index`, counting from the
  /// head. Costs O(`index`).
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of bounds.

  pub fn at_mut(&mut self, index: usize) -> &mut T {
    unwrap(at_mut(self, index))
  }

  /// A mutable reference to the element at `index`, counting from the
  /// head. Costs O(`index`).
  ///
  /// # Errors
  ///
  /// An error is returned when `index` is out of bounds.

  pub fn try_at_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
    at_mut(self, index)
  }

  /// A reference to the first element.
  ///
  /// # Panics
  ///
  /// Panics when the list is empty.

  pub fn front(&self) -> &T {
    unwrap(front(self))
  }

  /// A reference to the first element.
  ///
  /// # Errors
  ///
  /// An error is returned when the list is empty.

  pub fn try_front(&self) -> Result<&T, IndexError> {
    front(self)
  }

  /// A reference to the last element.
  ///
  /// # Panics
  ///
  /// Panics when the list is empty.

  pub fn back(&self) -> &T {
    unwrap(back(self))
  }

  /// A reference to the last element.
  ///
  /// # Errors
  ///
  /// An error is returned when the list is empty.

  pub fn try_back(&self) -> Result<&T, IndexError> {
    back(self)
  }

  /// Appends an element after the current tail.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_back(&mut self, value: T) {
    let node = self.store.insert(Node { value, next: None });
    match self.tail {
      Some(t) => self.store.node_mut(t).next = Some(node),
      None => self.head = Some(node),
    }
    self.tail = Some(node);
    self.len = self.len + 1;
  }

  /// Prepends an element before the current head.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_front(&mut self, value: T) {
    let node = self.store.insert(Node { value, next: self.head });
    self.head = Some(node);
    if self.tail.is_none() {
      self.tail = Some(node);
    }
    self.len = self.len + 1;
  }

  /// Inserts an element so it becomes the one at `index`; `index == len()`
  /// appends. Costs O(`index`).
  ///
  /// Unlike the access methods, a bad index is signaled through the return
  /// value alone and there is no panicking flavor: callers must check the
  /// result.
  ///
  /// # Errors
  ///
  /// An error is returned when `index > len()`; the list is unchanged.

  pub fn insert(&mut self, value: T, index: usize) -> Result<(), IndexError> {
    insert(self, value, index)
  }

  /// Removes and returns the last element. Costs O(`len()`), since the
  /// chain has no back links.
  ///
  /// # Panics
  ///
  /// Panics when the list is empty.

  pub fn pop_back(&mut self) -> T {
    unwrap(pop_back(self))
  }

  /// Removes and returns the last element. Costs O(`len()`), since the
  /// chain has no back links.
  ///
  /// # Errors
  ///
  /// An error is returned when the list is empty.

  pub fn try_pop_back(&mut self) -> Result<T, IndexError> {
    pop_back(self)
  }

  /// Removes and returns the first element.
  ///
  /// # Panics
  ///
  /// Panics when the list is empty.

  pub fn pop_front(&mut self) -> T {
    unwrap(pop_front(self))
  }

  /// Removes and returns the first element.
  ///
  /// # Errors
  ///
  /// An error is returned when the list is empty.

  pub fn try_pop_front(&mut self) -> Result<T, IndexError> {
    pop_front(self)
  }

  /// Removes and returns the element at `index`, splicing its neighbors
  /// together. Costs O(`index`).
  ///
  /// # Panics
  ///
  /// Panics when `index` is out of bounds; the list is unchanged.

  pub fn erase(&mut self, index: usize) -> T {
    unwrap(erase(self, index))
  }

  /// Removes and returns the element at `index`, splicing its neighbors
  /// together. Costs O(`index`).
  ///
  /// # Errors
  ///
  /// An error is returned when `index` is out of bounds; the list is
  /// unchanged.

  pub fn try_erase(&mut self, index: usize) -> Result<T, IndexError> {
    erase(self, index)
  }

  /// Removes every element. The node store keeps its capacity for reuse.
  ///
  /// Teardown is one flat pass over the store, not a walk of the chain, so
  /// long lists do not recurse.

  pub fn clear(&mut self) {
    self.store.clear();
    self.len = 0;
    self.head = None;
    self.tail = None;
  }

  /// The index of the first element equal to `value`, scanning head to
  /// tail, or `-1` if no element matches.

  pub fn index_of(&self, value: &T) -> isize
  where
    T: PartialEq
  {
    match self.iter().position(|x| x == value) {
      Some(i) => i as isize,
      None => -1,
    }
  }

  /// Iterates over the elements from head to tail.

  pub fn iter(&self) -> Iter<'_, T, A> {
    Iter {
      store: &self.store,
      cursor: self.head,
      remaining: self.len,
    }
  }
}

impl<T: Clone, A: Allocator + Clone> Clone for List<T, A> {
  fn clone(&self) -> Self {
    let mut list = List::with_capacity_in(self.len, self.allocator().clone());
    list.extend(self.iter().cloned());
    list
  }
}

impl<T, A: Allocator + Default> Default for List<T, A> {
  fn default() -> Self {
    Self::new_in(A::default())
  }
}

impl<T: PartialEq, A: Allocator> PartialEq for List<T, A> {
  fn eq(&self, other: &Self) -> bool {
    self.len == other.len && self.iter().zip(other.iter()).all(|(x, y)| x == y)
  }
}

impl<T: Eq, A: Allocator> Eq for List<T, A> { }

impl<T, A: Allocator> Extend<T> for List<T, A> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for value in iter {
      self.push_back(value);
    }
  }
}

impl<T> FromIterator<T> for List<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut list = List::new();
    list.extend(iter);
    list
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

// Renders `[e0, e1, ..., eN]` followed by a newline, head to tail. An
// empty list renders as `[]`.

impl<T: fmt::Display, A: Allocator> fmt::Display for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;

    let mut iter = self.iter();

    if let Some(first) = iter.next() {
      write!(f, "{}", first)?;
      for value in iter {
        write!(f, ", {}", value)?;
      }
    }

    f.write_str("]\n")
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iter                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T, A: Allocator> Iterator for Iter<'a, T, A> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a T> {
    let r = self.cursor?;
    let node = self.store.node(r);
    self.cursor = node.next;
    self.remaining = self.remaining - 1;
    Some(&node.value)
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<'a, T, A: Allocator> ExactSizeIterator for Iter<'a, T, A> { }

impl<'a, T, A: Allocator> FusedIterator for Iter<'a, T, A> { }

impl<'a, T, A: Allocator> Clone for Iter<'a, T, A> {
  fn clone(&self) -> Self {
    Iter {
      store: self.store,
      cursor: self.cursor,
      remaining: self.remaining,
    }
  }
}

impl<'a, T, A: Allocator> fmt::Debug for Iter<'a, T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Iter").field(&self.remaining).finish()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T, A>;

  fn into_iter(self) -> Iter<'a, T, A> {
    self.iter()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// IntoIter                                                                   //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
  type Item = T;

  #[inline(always)]
  fn next(&mut self) -> Option<T> {
    match self.0.try_pop_front() {
      Ok(value) => Some(value),
      Err(IndexError) => None,
    }
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.0.len, Some(self.0.len))
  }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> { }

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> { }

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.0).finish()
  }
}

impl<T, A: Allocator> IntoIterator for List<T, A> {
  type Item = T;
  type IntoIter = IntoIter<T, A>;

  fn into_iter(self) -> IntoIter<T, A> {
    IntoIter(self)
  }
}

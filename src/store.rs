use core::mem;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use allocator_api2::vec::Vec;

// Handles are 32 bits so an `Entry` stays small even after the enum
// discriminant. A full store holds 2^32 - 1 nodes before the cold panic
// below fires.

const MAX_NODES: usize = u32::MAX as usize;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef(u32);

pub(crate) struct Node<T> {
  pub(crate) value: T,
  pub(crate) next: Option<NodeRef>,
}

enum Entry<T> {
  Occupied(Node<T>),
  Vacant(Option<NodeRef>),
}

// A slab of nodes with a free list threaded through the vacant entries.
// Handles stay valid until `remove` or `clear`; the chain structure built
// on top of them is the caller's business.

pub(crate) struct Store<T, A: Allocator = Global> {
  entries: Vec<Entry<T>, A>,
  free: Option<NodeRef>,
}

#[inline(never)]
#[cold]
fn too_many_nodes() -> ! {
  panic!("oxtail: the node store is full!")
}

impl NodeRef {
  #[inline(always)]
  fn index(self) -> usize {
    self.0 as usize
  }
}

impl<T, A: Allocator> Store<T, A> {
  #[inline(always)]
  pub(crate) fn with_capacity_in(capacity: usize, allocator: A) -> Self {
    Self {
      entries: Vec::with_capacity_in(capacity, allocator),
      free: None,
    }
  }

  #[inline(always)]
  pub(crate) fn allocator(&self) -> &A {
    self.entries.allocator()
  }

  pub(crate) fn insert(&mut self, node: Node<T>) -> NodeRef {
    match self.free {
      Some(r) => {
        let entry = mem::replace(&mut self.entries[r.index()], Entry::Occupied(node));
        self.free =
          match entry {
            Entry::Vacant(next) => next,
            Entry::Occupied(_) => unreachable!(),
          };
        r
      }
      None => {
        let index = self.entries.len();
        if index > MAX_NODES {
          too_many_nodes()
        }
        self.entries.push(Entry::Occupied(node));
        NodeRef(index as u32)
      }
    }
  }

  pub(crate) fn remove(&mut self, at: NodeRef) -> Node<T> {
    let entry = mem::replace(&mut self.entries[at.index()], Entry::Vacant(self.free));
    self.free = Some(at);
    match entry {
      Entry::Occupied(node) => node,
      Entry::Vacant(_) => unreachable!(),
    }
  }

  #[inline(always)]
  pub(crate) fn node(&self, at: NodeRef) -> &Node<T> {
    match &self.entries[at.index()] {
      Entry::Occupied(node) => node,
      Entry::Vacant(_) => unreachable!(),
    }
  }

  #[inline(always)]
  pub(crate) fn node_mut(&mut self, at: NodeRef) -> &mut Node<T> {
    match &mut self.entries[at.index()] {
      Entry::Occupied(node) => node,
      Entry::Vacant(_) => unreachable!(),
    }
  }

  // Drops every node in one pass over the slab; the chain is never walked.
  // Capacity is kept for reuse.

  #[inline(always)]
  pub(crate) fn clear(&mut self) {
    self.entries.clear();
    self.free = None;
  }
}

use super::event::ClientName;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Order in which waiting clients are handed a freed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitingOrder {
    /// Longest-waiting client first
    Insertion,
    /// Alphabetically smallest name first
    Lexicographic,
}

impl Default for WaitingOrder {
    fn default() -> Self {
        WaitingOrder::Insertion
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Members {
    Queue {
        order: VecDeque<ClientName>,
        index: HashSet<ClientName>,
    },
    Sorted(BTreeSet<ClientName>),
}

/// Clients inside the club that do not occupy a table
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingSet {
    members: Members,
}

impl WaitingSet {
    pub fn new(order: WaitingOrder) -> Self {
        let members = match order {
            WaitingOrder::Insertion => Members::Queue {
                order: VecDeque::new(),
                index: HashSet::new(),
            },
            WaitingOrder::Lexicographic => Members::Sorted(BTreeSet::new()),
        };
        Self { members }
    }

    pub fn contains(&self, name: &str) -> bool {
        match &self.members {
            Members::Queue { index, .. } => index.contains(name),
            Members::Sorted(set) => set.contains(name),
        }
    }

    /// Insert a client; returns `false` if the name was already waiting.
    pub fn insert(&mut self, name: ClientName) -> bool {
        match &mut self.members {
            Members::Queue { order, index } => {
                if !index.insert(name.clone()) {
                    return false;
                }
                order.push_back(name);
                true
            }
            Members::Sorted(set) => set.insert(name),
        }
    }

    /// Remove a client; returns `false` if the name was not waiting.
    pub fn remove(&mut self, name: &str) -> bool {
        match &mut self.members {
            Members::Queue { order, index } => {
                if !index.remove(name) {
                    return false;
                }
                order.retain(|waiting| waiting != name);
                true
            }
            Members::Sorted(set) => set.remove(name),
        }
    }

    /// Take the next client in this set's order
    pub fn pop_next(&mut self) -> Option<ClientName> {
        match &mut self.members {
            Members::Queue { order, index } => {
                let name = order.pop_front()?;
                index.remove(&name);
                Some(name)
            }
            Members::Sorted(set) => set.pop_first(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.members {
            Members::Queue { index, .. } => index.len(),
            Members::Sorted(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in pop order
    pub fn names(&self) -> Vec<&str> {
        match &self.members {
            Members::Queue { order, .. } => order.iter().map(String::as_str).collect(),
            Members::Sorted(set) => set.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for WaitingSet {
    fn default() -> Self {
        Self::new(WaitingOrder::default())
    }
}

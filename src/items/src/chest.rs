//src/items/src/chest.rs
use serde::{Deserialize, Serialize};

use crate::Item;

/// 宝箱：打开前持有内容物
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Chest {
    pub contents: Vec<Item>,
    pub opened: bool,
}

impl Chest {
    pub fn new(contents: Vec<Item>) -> Self {
        Self {
            contents,
            opened: false,
        }
    }

    /// Moves contents out while `accept` keeps taking them.
    ///
    /// `accept` returns the item back when the receiver is full; that item and
    /// everything after it stays in the chest. Returns how many items moved.
    pub fn take_contents<F>(&mut self, mut accept: F) -> usize
    where
        F: FnMut(Item) -> Option<Item>,
    {
        self.opened = true;
        let mut moved = 0;
        let mut remaining = Vec::new();
        let mut full = false;
        for item in self.contents.drain(..) {
            if full {
                remaining.push(item);
                continue;
            }
            match accept(item) {
                None => moved += 1,
                Some(rejected) => {
                    full = true;
                    remaining.push(rejected);
                }
            }
        }
        self.contents = remaining;
        moved
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

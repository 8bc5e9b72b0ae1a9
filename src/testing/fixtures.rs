//! Instrumented sources and sample datasets.

use crate::{Enumerable, SeqBound};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// A source whose generator counts its own invocations.
///
/// Clones share the counters, so a test can keep one handle while the
/// pipeline owns the sequences built from it.
#[derive(Clone, Debug, Default)]
pub struct CountingSource {
    pulls: Rc<Cell<usize>>,
    enumerations: Rc<Cell<usize>>,
}

impl CountingSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Infinite sequence `0, 1, 2, ...`; each element costs one generator call.
    #[must_use]
    pub fn naturals(&self) -> Enumerable<u64> {
        let pulls = Rc::clone(&self.pulls);
        let enumerations = Rc::clone(&self.enumerations);
        Enumerable::from_generator(move || {
            enumerations.set(enumerations.get() + 1);
            let pulls = Rc::clone(&pulls);
            let mut next = 0u64;
            move || {
                pulls.set(pulls.get() + 1);
                let n = next;
                next += 1;
                Some(n)
            }
        })
    }

    /// Finite sequence over `data`. The call that reports exhaustion is
    /// counted too.
    #[must_use]
    pub fn over<T: SeqBound>(&self, data: Vec<T>) -> Enumerable<T> {
        let pulls = Rc::clone(&self.pulls);
        let enumerations = Rc::clone(&self.enumerations);
        let data: Rc<[T]> = Rc::from(data);
        Enumerable::from_generator(move || {
            enumerations.set(enumerations.get() + 1);
            let pulls = Rc::clone(&pulls);
            let data = Rc::clone(&data);
            let mut pos = 0;
            move || {
                pulls.set(pulls.get() + 1);
                let item = data.get(pos).cloned();
                pos += 1;
                item
            }
        })
    }

    /// Generator invocations so far, across all enumerations.
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }

    /// Number of times an enumeration of the source was started.
    pub fn enumerations(&self) -> usize {
        self.enumerations.get()
    }

    pub fn reset(&self) {
        self.pulls.set(0);
        self.enumerations.set(0);
    }
}

/// Employee record for grouping, ordering and join tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub boss: String,
    pub age: u32,
}

/// Five employees under three bosses; ages repeat.
#[must_use]
pub fn sample_employees() -> Vec<Employee> {
    [
        (1, "Tim", "Rob", 34),
        (2, "Anne", "Mike", 29),
        (3, "Matt", "Jessica", 41),
        (4, "Sara", "Rob", 29),
        (5, "Lee", "Mike", 52),
    ]
    .into_iter()
    .map(|(id, name, boss, age)| Employee {
        id,
        name: name.to_owned(),
        boss: boss.to_owned(),
        age,
    })
    .collect()
}

/// `(employee_id, project)` assignments; employee 3 has none, 1 has two.
#[must_use]
pub fn sample_assignments() -> Vec<(u32, String)> {
    vec![
        (1, "ledger".to_owned()),
        (2, "search".to_owned()),
        (1, "billing".to_owned()),
        (4, "search".to_owned()),
        (5, "ledger".to_owned()),
    ]
}

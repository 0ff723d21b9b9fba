use std::fmt::Display;

/// A worksheet that is executed, together with the time step of its first sub-activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduledWorksheet {
    /// Position of the worksheet in [`crate::instance::Instance::worksheets`].
    pub worksheet: usize,
    pub start: i32,
}

/// A schedule given as `(worksheet index, start)` pairs; worksheets which do not appear are not
/// executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    scheduled: Vec<ScheduledWorksheet>,
}

impl Solution {
    pub fn new(mut scheduled: Vec<ScheduledWorksheet>) -> Solution {
        scheduled.sort();
        Solution { scheduled }
    }

    pub fn scheduled(&self) -> &[ScheduledWorksheet] {
        &self.scheduled
    }

    pub fn start_of(&self, worksheet: usize) -> Option<i32> {
        self.scheduled
            .binary_search_by_key(&worksheet, |entry| entry.worksheet)
            .ok()
            .map(|position| self.scheduled[position].start)
    }

    pub fn is_selected(&self, worksheet: usize) -> bool {
        self.start_of(worksheet).is_some()
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

impl FromIterator<(usize, i32)> for Solution {
    fn from_iter<T: IntoIterator<Item = (usize, i32)>>(iter: T) -> Self {
        Solution::new(
            iter.into_iter()
                .map(|(worksheet, start)| ScheduledWorksheet { worksheet, start })
                .collect(),
        )
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (position, entry) in self.scheduled.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}]", entry.worksheet, entry.start)?;
        }
        write!(f, "]")
    }
}

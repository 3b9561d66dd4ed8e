// File: crates/chartmesh-core/src/stack.rs
// Summary: Stack groups: cumulative offsets for series sharing a stack name.

use std::collections::HashMap;

use crate::series::Series;

/// Per-frame stacking table. Members are kept in registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackTable {
    groups: Vec<StackGroup>,
    by_series: HashMap<usize, (usize, usize)>,
}

#[derive(Clone, Debug, PartialEq)]
struct StackGroup {
    name: String,
    members: Vec<usize>,
    /// `heights[member][data index]`; ignored points contribute zero.
    heights: Vec<Vec<f64>>,
}

impl StackTable {
    /// Group the visible, stacked series by name in series order.
    pub fn build(series: &[Series]) -> Self {
        let mut table = Self::default();
        for (si, s) in series.iter().enumerate() {
            let Some(name) = s.stack.as_deref() else { continue };
            if !s.show {
                continue;
            }
            let gi = match table.groups.iter().position(|g| g.name == name) {
                Some(gi) => gi,
                None => {
                    table.groups.push(StackGroup { name: name.to_string(), members: Vec::new(), heights: Vec::new() });
                    table.groups.len() - 1
                }
            };
            let group = &mut table.groups[gi];
            table.by_series.insert(si, (gi, group.members.len()));
            group.members.push(si);
            group.heights.push(Vec::new());
        }
        table
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_member(&self, series: usize) -> bool {
        self.by_series.contains_key(&series)
    }

    /// Member count of the group `series` belongs to (0 when unstacked).
    pub fn group_len(&self, series: usize) -> usize {
        self.by_series.get(&series).map(|(g, _)| self.groups[*g].members.len()).unwrap_or(0)
    }

    /// Series index of the member drawn immediately before `series` in its group.
    pub fn previous_member(&self, series: usize) -> Option<usize> {
        let (g, m) = *self.by_series.get(&series)?;
        if m == 0 { None } else { Some(self.groups[g].members[m - 1]) }
    }

    /// Record the own (non-cumulative) height of `series` at `index`.
    pub fn set_height(&mut self, series: usize, index: usize, height: f64) {
        let Some(&(g, m)) = self.by_series.get(&series) else { return };
        let row = &mut self.groups[g].heights[m];
        if row.len() <= index {
            row.resize(index + 1, 0.0);
        }
        row[index] = if height.is_finite() { height } else { 0.0 };
    }

    pub fn height(&self, series: usize, index: usize) -> f64 {
        match self.by_series.get(&series) {
            Some(&(g, m)) => self.groups[g].heights[m].get(index).copied().unwrap_or(0.0),
            None => 0.0,
        }
    }

    /// Sum of heights of the members registered before `series`, at `index`.
    pub fn offset(&self, series: usize, index: usize) -> f64 {
        let Some(&(g, m)) = self.by_series.get(&series) else { return 0.0 };
        self.groups[g].heights[..m].iter().map(|row| row.get(index).copied().unwrap_or(0.0)).sum()
    }

    /// Cumulative top of the stack at `index` through `series` inclusive.
    pub fn cumulative(&self, series: usize, index: usize) -> f64 {
        self.offset(series, index) + self.height(series, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_follow_registration_order() {
        let series = vec![
            Series::line("a", [1.0, 2.0]).with_stack("s"),
            Series::line("free", [7.0, 7.0]),
            Series::line("b", [3.0, 4.0]).with_stack("s"),
        ];
        let mut t = StackTable::build(&series);
        t.set_height(0, 1, 2.0);
        t.set_height(2, 1, 4.0);
        assert_eq!(t.offset(0, 1), 0.0);
        assert_eq!(t.offset(2, 1), 2.0);
        assert_eq!(t.cumulative(2, 1), 6.0);
        assert_eq!(t.previous_member(2), Some(0));
        assert!(!t.is_member(1));
    }
}

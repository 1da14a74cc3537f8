//! Path storage
//!
//! A [`Path`] records outline commands so they can be replayed into any
//!   [`Adder`], usually a [`Rasterizer`](../raster/struct.Rasterizer.html).
//!
//!     use smooth_raster::{Adder, Path, PathCommand, p26_6};
//!
//!     let mut path = Path::new();
//!     path.start(p26_6(0, 0));
//!     path.add1(p26_6(4, 0));
//!     path.add2(p26_6(4, 4), p26_6(0, 4));
//!     assert_eq!(path.len(), 3);
//!     assert_eq!(path.commands()[1], PathCommand::Line(p26_6(4, 0)));
//!

use crate::fixed::Point26_6;
use crate::Adder;

/// Single outline command
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PathCommand {
    /// Begin a new subpath
    Start(Point26_6),
    /// Line to the point
    Line(Point26_6),
    /// Quadratic Bézier with one control point
    Quad(Point26_6, Point26_6),
    /// Cubic Bézier with two control points
    Cubic(Point26_6, Point26_6, Point26_6),
}

/// Replayable list of outline commands
#[derive(Debug,Default,Clone,PartialEq,Eq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
    pub fn len(&self) -> usize {
        self.commands.len()
    }
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
    /// Remove all commands, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }
    pub fn iter(&self) -> std::slice::Iter<'_, PathCommand> {
        self.commands.iter()
    }
    /// Replay every command into `sink`
    pub fn replay<A: Adder + ?Sized>(&self, sink: &mut A) {
        for cmd in &self.commands {
            match *cmd {
                PathCommand::Start(a) => sink.start(a),
                PathCommand::Line(b) => sink.add1(b),
                PathCommand::Quad(b, c) => sink.add2(b, c),
                PathCommand::Cubic(b, c, d) => sink.add3(b, c, d),
            }
        }
    }
}

impl Adder for Path {
    fn start(&mut self, a: Point26_6) {
        self.commands.push(PathCommand::Start(a));
    }
    fn add1(&mut self, b: Point26_6) {
        self.commands.push(PathCommand::Line(b));
    }
    fn add2(&mut self, b: Point26_6, c: Point26_6) {
        self.commands.push(PathCommand::Quad(b, c));
    }
    fn add3(&mut self, b: Point26_6, c: Point26_6, d: Point26_6) {
        self.commands.push(PathCommand::Cubic(b, c, d));
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathCommand;
    type IntoIter = std::slice::Iter<'a, PathCommand>;
    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::p26_6;

    #[test]
    fn replay_into_path() {
        let mut a = Path::new();
        a.start(p26_6(1, 1));
        a.add1(p26_6(2, 1));
        a.add3(p26_6(3, 1), p26_6(3, 3), p26_6(1, 3));
        let mut b = Path::new();
        a.replay(&mut b);
        assert_eq!(a, b);
        b.clear();
        assert!(b.is_empty());
    }
}

#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct MazeSize(pub i32);

#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct StepLimit(pub usize);

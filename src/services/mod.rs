// Author: Dustin Pilgrim
// License: MIT

pub mod frames;
pub mod ticker;

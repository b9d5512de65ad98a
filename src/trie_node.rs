mod node;

pub(crate) use node::{array_key, Node};

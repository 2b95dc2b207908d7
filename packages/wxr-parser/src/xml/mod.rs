//! XML helpers: namespaced child lookup and text access over a `roxmltree` tree.

mod utils;

pub use utils::{
    child_text, find_child, find_children, get_attribute, get_tag_name,
    has_tag, node_text, require_child,
};

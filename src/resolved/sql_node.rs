/// Behaviour shared by every resolved node and clause.
pub trait SqlNode {
    fn render(&self) -> String;

    /// True when the node is an aggregate call or contains one.
    fn is_aggregate(&self) -> bool;
}

/// An absent clause renders as the empty string.
impl<T: SqlNode> SqlNode for Option<T> {
    fn render(&self) -> String {
        self.as_ref().map(SqlNode::render).unwrap_or_default()
    }

    fn is_aggregate(&self) -> bool {
        self.as_ref().is_some_and(SqlNode::is_aggregate)
    }
}

/// Quote an identifier with backticks, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render a list with `, ` between items.
pub fn render_list<T: SqlNode>(items: &[T]) -> String {
    items.iter().map(SqlNode::render).collect::<Vec<_>>().join(", ")
}

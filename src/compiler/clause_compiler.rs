use crate::{
    ast::{
        Direction, GroupByClauseInput, HavingClauseInput, JoinClauseInput, JoinType, Keyword, LimitInput,
        OrderByClauseInput, SelectClauseInput, SelectColumns, SelectItem, TableSource, WhereClauseInput,
    },
    compiler::{ClauseKind, CompileContext, CompileError, ExpressionCompiler, Result},
    resolved::{
        GroupByClause, HavingClause, JoinClause, LimitClause, OrderByClause, OrderByItem, ResolvedSelectItem,
        ResolvedSource, SelectClause, SelectList, SqlNode, WhereClause,
    },
};

/// Builds resolved clauses and enforces where aggregates may appear.
pub struct ClauseCompiler;

impl ClauseCompiler {
    /// Fails when `node` holds an aggregate and `clause` does not allow one.
    pub fn check_placement(clause: ClauseKind, node: &impl SqlNode) -> Result<()> {
        if !clause.allows_aggregates() && node.is_aggregate() {
            return CompileError::ImproperAggregatePlacement { clause }.err();
        }
        Ok(())
    }

    /// FROM, then the JOIN, then the output list.
    pub async fn select_from_input(input: &SelectClauseInput, ctx: CompileContext<'_>) -> Result<SelectClause> {
        let from = Self::source_from_input(&input.from, ctx).await?;
        let join = match &input.join_clause {
            Some(join) => Some(Self::join_from_input(join, ctx).await?),
            None => None,
        };

        let columns = match &input.columns {
            SelectColumns::All(_) => SelectList::All,
            SelectColumns::List(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    resolved.push(Self::select_item_from_input(item, ctx).await?);
                }
                SelectList::Items(resolved)
            }
        };

        Ok(SelectClause { columns, from, join })
    }

    async fn select_item_from_input(item: &SelectItem, ctx: CompileContext<'_>) -> Result<ResolvedSelectItem> {
        Ok(match item {
            SelectItem::Aliased(reference) => {
                ResolvedSelectItem::Aliased(ExpressionCompiler::resolve_operand_alias(reference, ctx).await?)
            }
            SelectItem::Subquery(reference) => {
                ResolvedSelectItem::Subquery(ExpressionCompiler::resolve_scalar_subquery(reference, ctx).await?)
            }
        })
    }

    /// FROM / JOIN position: a table alias or a stored query as a derived table.
    pub async fn source_from_input(input: &TableSource, ctx: CompileContext<'_>) -> Result<ResolvedSource> {
        match input {
            TableSource::Aliased(reference) => {
                let alias = ctx.cache.fetch_alias(&reference.lookup, ctx.owner).await?;
                if !alias.is_table {
                    return CompileError::WrongOperandKind(format!(
                        "alias '{}' is not a table and cannot be used as a query source",
                        alias.name
                    )).err();
                }
                Ok(ResolvedSource::Table(alias))
            }
            TableSource::Subquery(reference) => {
                Ok(ResolvedSource::Subquery(ExpressionCompiler::fetch_query(reference, ctx).await?))
            }
        }
    }

    pub async fn join_from_input(input: &JoinClauseInput, ctx: CompileContext<'_>) -> Result<JoinClause> {
        let join_type = JoinType::parse(&input.join_type)?;
        let table = Self::source_from_input(&input.table, ctx).await?;
        let on_condition = ExpressionCompiler::resolve_boolean(&input.on_condition, ctx).await?;
        Self::check_placement(ClauseKind::Join, &on_condition)?;
        Ok(JoinClause { join_type, table, on_condition })
    }

    pub async fn where_from_input(input: &WhereClauseInput, ctx: CompileContext<'_>) -> Result<WhereClause> {
        let expression = ExpressionCompiler::resolve_boolean(&input.expression, ctx).await?;
        Self::check_placement(ClauseKind::Where, &expression)?;
        Ok(WhereClause { expression })
    }

    pub async fn group_by_from_input(input: &GroupByClauseInput, ctx: CompileContext<'_>) -> Result<GroupByClause> {
        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let resolved = ExpressionCompiler::resolve_expression(item, ctx).await?;
            Self::check_placement(ClauseKind::GroupBy, &resolved)?;
            items.push(resolved);
        }
        Ok(GroupByClause { items })
    }

    pub async fn having_from_input(input: &HavingClauseInput, ctx: CompileContext<'_>) -> Result<HavingClause> {
        let expression = ExpressionCompiler::resolve_boolean(&input.expression, ctx).await?;
        Ok(HavingClause { expression })
    }

    pub async fn order_by_from_input(input: &OrderByClauseInput, ctx: CompileContext<'_>) -> Result<OrderByClause> {
        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let direction = Direction::parse(&item.direction)?;
            let operand = ExpressionCompiler::resolve_expression(&item.operand, ctx).await?;
            items.push(OrderByItem { operand, direction });
        }
        Ok(OrderByClause { items })
    }

    pub fn limit_from_input(input: &LimitInput) -> LimitClause {
        LimitClause::from(*input)
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::{
    ast::SelectQueryInput,
    compiler::{ClauseCompiler, CompileContext, CompileError, Result},
    database::{OwnerId, ResolutionCache, StoredQuery},
    resolved::{CompiledQuery, ResolvedQuery},
};

/// Trailing `LIMIT n` with an optional `OFFSET m`, at the very end of a statement body.
static TRAILING_LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bLIMIT\s+(\d+)(?:\s+OFFSET\s+\d+)?\s*$").unwrap()
});

/// Top-level entry points: resolve, compile and scalarize.
pub struct QueryCompiler;

impl QueryCompiler {
    /// Resolve every clause in statement order; the first failure aborts.
    pub async fn resolve(input: &SelectQueryInput, ctx: CompileContext<'_>) -> Result<ResolvedQuery> {
        let select = ClauseCompiler::select_from_input(&input.select, ctx).await?;

        let where_clause = match &input.where_clause {
            Some(clause) => Some(ClauseCompiler::where_from_input(clause, ctx).await?),
            None => None,
        };
        let group_by = match &input.groupby {
            Some(clause) => Some(ClauseCompiler::group_by_from_input(clause, ctx).await?),
            None => None,
        };
        let having = match &input.having {
            Some(clause) => Some(ClauseCompiler::having_from_input(clause, ctx).await?),
            None => None,
        };
        let order_by = match &input.orderby {
            Some(clause) => Some(ClauseCompiler::order_by_from_input(clause, ctx).await?),
            None => None,
        };
        let limit = input.limit.as_ref().map(ClauseCompiler::limit_from_input);

        Ok(ResolvedQuery { select, where_clause, group_by, having, order_by, limit })
    }

    pub async fn compile(input: &SelectQueryInput, owner: OwnerId, cache: &ResolutionCache) -> Result<CompiledQuery> {
        let resolved = Self::resolve(input, CompileContext::new(owner, cache)).await?;
        let compiled = CompiledQuery::from(&resolved);
        info!(owner, column_count = compiled.column_count, "compiled query");
        debug!(sql = %compiled.sql, "compiled sql");
        Ok(compiled)
    }

    /// Statement body of `query` limited to one row, for use as a scalar value.
    ///
    /// The query must return exactly one column. An existing trailing `LIMIT` must be
    /// `LIMIT 1`; without one, ` LIMIT 1` is appended.
    pub fn scalarize(query: &StoredQuery) -> Result<String> {
        if query.column_count != 1 {
            return CompileError::SubqueryNotScalarizable {
                name: query.name.clone(),
                reason: format!("it returns {} columns instead of one", Self::describe_columns(query.column_count)),
            }.err();
        }

        let body = query.body();
        match TRAILING_LIMIT.captures(body) {
            Some(captures) => {
                let limit = &captures[1];
                if limit.parse::<u64>().ok() != Some(1) {
                    return CompileError::SubqueryNotScalarizable {
                        name: query.name.clone(),
                        reason: format!("it is limited to {} rows instead of one", limit),
                    }.err();
                }
                Ok(body.to_string())
            }
            None => Ok(format!("{} LIMIT 1", body)),
        }
    }

    fn describe_columns(column_count: i64) -> String {
        if column_count < 0 { "all".to_string() } else { column_count.to_string() }
    }
}

use std::sync::Arc;

use dynawire_model::input::ListTablesInput;
use dynawire_model::output::ListTablesOutput;

use crate::cursor::resume_name;
use crate::error::{Error, Result};
use crate::executor::Executor;

/// Lists table names one page at a time.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct ListTables {
    executor: Arc<dyn Executor>,
    input: ListTablesInput,
}

impl ListTables {
    pub(crate) fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            input: ListTablesInput::default(),
        }
    }

    /// Return at most `limit` names.
    pub fn limit(&self, limit: u32) -> Self {
        let mut next = self.clone();
        next.input.limit = Some(limit);
        next
    }

    /// Resume after `table`.
    pub fn exclusive_start_table_name(&self, table: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.input.exclusive_start_table_name = Some(table.into());
        next
    }

    /// The request as it will be sent.
    #[must_use]
    pub fn input(&self) -> &ListTablesInput {
        &self.input
    }

    /// Fetch one page.
    pub async fn execute(&self) -> Result<ListTablesResult> {
        let schema = self
            .executor
            .schema()
            .ok_or(Error::Unsupported("table operations"))?;
        schema.list_tables(self).await
    }
}

/// One page of table names.
#[derive(Debug, Clone)]
pub struct ListTablesResult {
    /// Table names on this page.
    pub table_names: Vec<String>,
    /// Where this page stopped, when more may follow.
    pub last_evaluated_table_name: Option<String>,
    request: ListTables,
}

impl ListTablesResult {
    pub(crate) fn new(output: ListTablesOutput, request: ListTables) -> Self {
        Self {
            table_names: output.table_names,
            last_evaluated_table_name: output.last_evaluated_table_name,
            request,
        }
    }

    /// The request for the following page, or `None` after the last page.
    #[must_use]
    pub fn next(&self) -> Option<ListTables> {
        resume_name(self.last_evaluated_table_name.as_deref())
            .map(|name| self.request.exclusive_start_table_name(name))
    }
}

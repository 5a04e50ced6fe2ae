use std::sync::Arc;

use dynawire_model::input::DeleteItemInput;
use dynawire_model::output::WriteItemOutput;
use dynawire_model::types::{CapacityDetail, ReturnValues};
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::error::Result;
use crate::executor::Executor;

/// Result of a delete.
pub type DeleteItemResult = WriteItemOutput;

/// Removes one item by primary key.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct DeleteItem {
    executor: Arc<dyn Executor>,
    input: DeleteItemInput,
    param_error: Option<ParamError>,
}

impl DeleteItem {
    pub(crate) fn new(
        executor: Arc<dyn Executor>,
        table: impl Into<String>,
        key: Document,
    ) -> Self {
        Self {
            executor,
            input: DeleteItemInput {
                table_name: table.into(),
                key,
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// Only delete when `expression` holds for the existing item.
    pub fn condition_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.condition_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Return the deleted item.
    pub fn return_values(&self, return_values: ReturnValues) -> Self {
        let mut next = self.clone();
        next.input.return_values = Some(return_values);
        next
    }

    /// Ask for consumed capacity in the result.
    pub fn return_consumed_capacity(&self, detail: CapacityDetail) -> Self {
        let mut next = self.clone();
        next.input.return_consumed_capacity = Some(detail);
        next
    }

    /// The request as it will be sent.
    #[must_use]
    pub fn input(&self) -> &DeleteItemInput {
        &self.input
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<DeleteItemResult> {
        check_params(self.param_error.as_ref())?;
        check_documents([
            &self.input.key,
            self.input.expression_attributes.values(),
        ])?;
        self.executor.delete_item(self).await
    }
}

impl_params!(DeleteItem);

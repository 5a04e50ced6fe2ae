use std::sync::Arc;

use dynawire_model::input::PutItemInput;
use dynawire_model::output::WriteItemOutput;
use dynawire_model::types::{CapacityDetail, ReturnValues};
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::error::Result;
use crate::executor::Executor;

/// Result of a put. `attributes` is only filled in when return values
/// other than `NONE` were requested.
pub type PutItemResult = WriteItemOutput;

/// Creates or replaces one item.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct PutItem {
    executor: Arc<dyn Executor>,
    input: PutItemInput,
    param_error: Option<ParamError>,
}

impl PutItem {
    pub(crate) fn new(
        executor: Arc<dyn Executor>,
        table: impl Into<String>,
        item: Document,
    ) -> Self {
        Self {
            executor,
            input: PutItemInput {
                table_name: table.into(),
                item,
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// Only write when `expression` holds for the existing item.
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

    /// Return the item as it was before the put.
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
    pub fn input(&self) -> &PutItemInput {
        &self.input
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<PutItemResult> {
        check_params(self.param_error.as_ref())?;
        check_documents([
            &self.input.item,
            self.input.expression_attributes.values(),
        ])?;
        self.executor.put_item(self).await
    }
}

impl_params!(PutItem);

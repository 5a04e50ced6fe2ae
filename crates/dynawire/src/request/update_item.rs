use std::sync::Arc;

use dynawire_model::input::UpdateItemInput;
use dynawire_model::output::WriteItemOutput;
use dynawire_model::types::{CapacityDetail, ReturnValues};
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::error::Result;
use crate::executor::Executor;

/// Result of an update.
pub type UpdateItemResult = WriteItemOutput;

/// Modifies attributes of one item, creating it if needed.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct UpdateItem {
    executor: Arc<dyn Executor>,
    input: UpdateItemInput,
    param_error: Option<ParamError>,
}

impl UpdateItem {
    pub(crate) fn new(
        executor: Arc<dyn Executor>,
        table: impl Into<String>,
        key: Document,
    ) -> Self {
        Self {
            executor,
            input: UpdateItemInput {
                table_name: table.into(),
                key,
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// The `SET` / `REMOVE` / `ADD` / `DELETE` clauses to apply.
    pub fn update_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.update_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Only update when `expression` holds for the existing item.
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

    /// Which attributes to return.
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
    pub fn input(&self) -> &UpdateItemInput {
        &self.input
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<UpdateItemResult> {
        check_params(self.param_error.as_ref())?;
        check_documents([
            &self.input.key,
            self.input.expression_attributes.values(),
        ])?;
        self.executor.update_item(self).await
    }
}

impl_params!(UpdateItem);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dynawire_model::{Document, Param};

    use crate::Client;
    use crate::mock::MockExecutor;

    #[test]
    fn test_should_merge_params_from_both_expressions() {
        let client = Client::with_executor(Arc::new(MockExecutor::new()));
        let update = client
            .update_item("t", Document::hash_key("Id", 1))
            .update_expression("SET #n = :n", [Param::new("#n", "Name"), Param::new(":n", "Bob")])
            .condition_expression("attribute_exists(Id)", ());

        let attributes = &update.input().expression_attributes;
        assert_eq!(attributes.values().len(), 1);
        assert_eq!(attributes.names().len(), 1);
        assert_eq!(update.input().condition_expression.as_deref(), Some("attribute_exists(Id)"));

        let body = serde_json::to_value(update.input()).unwrap();
        assert_eq!(body["ExpressionAttributeNames"], serde_json::json!({"#n": "Name"}));
        assert_eq!(
            body["ExpressionAttributeValues"],
            serde_json::json!({":n": {"S": "Bob"}})
        );
    }
}

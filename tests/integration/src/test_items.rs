//! Single-item operations.

#[cfg(test)]
mod tests {
    use dynawire::types::ReturnValues;
    use dynawire::{Document, ErrorKind, Param, Value};

    use crate::{cleanup_table, client, create_hash_table};

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_put_then_get_item() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "items").await;

        client
            .put_item(&table, Document::new().with("Id", 1).with("Name", "Bob"))
            .execute()
            .await?;
        let result = client
            .get_item(&table, Document::hash_key("Id", 1))
            .execute()
            .await?;

        let item = result.item.expect("item should exist");
        assert_eq!(item.get_string("Name")?, Some("Bob"));
        assert_eq!(item.get_number("Id")?.map(|n| n.to_i64()).transpose()?, Some(1));

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_return_none_for_missing_item() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "missing").await;

        let result = client
            .get_item(&table, Document::hash_key("Id", 404))
            .consistent_read(true)
            .execute()
            .await?;
        assert!(result.item.is_none());

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_update_and_return_new_values() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "update").await;
        let key = Document::hash_key("Id", 7);

        let result = client
            .update_item(&table, key.clone())
            .update_expression(
                "SET #c = if_not_exists(#c, :zero) + :one",
                [
                    Param::new("#c", "Counter"),
                    Param::new(":zero", 0),
                    Param::new(":one", 1),
                ],
            )
            .return_values(ReturnValues::AllNew)
            .execute()
            .await?;

        let attributes = result.attributes.expect("attributes requested");
        assert_eq!(attributes.get_number("Counter")?.map(|n| n.as_str()), Some("1"));

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_fail_conditional_put() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "cond").await;
        let put = client
            .put_item(&table, Document::new().with("Id", 1).with("Name", "Bob"))
            .condition_expression("attribute_not_exists(Id)", ());

        put.execute().await?;
        let err = put.execute().await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ConditionCheckFailed));
        assert!(!err.is_retryable());

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_delete_and_return_old_item() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "delete").await;
        client
            .put_item(&table, Document::new().with("Id", 3).with("Tags", vec![Value::from("a")]))
            .execute()
            .await?;

        let result = client
            .delete_item(&table, Document::hash_key("Id", 3))
            .return_values(ReturnValues::AllOld)
            .execute()
            .await?;
        let old = result.attributes.expect("old item requested");
        assert_eq!(old.get_list("Tags")?.map(<[_]>::len), Some(1));

        cleanup_table(&client, &table).await;
        Ok(())
    }
}

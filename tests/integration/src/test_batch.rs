//! Batch reads and writes.

#[cfg(test)]
mod tests {
    use dynawire::Document;

    use crate::{cleanup_table, client, create_hash_table};

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_batch_write_then_batch_get() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "batch").await;

        let mut write = client.batch_write().put(
            &table,
            (1..=5).map(|id| Document::new().with("Id", id).with("Name", format!("user-{id}"))),
        );
        while !write.is_empty() {
            match write.execute().await?.retry() {
                Some(retry) => write = retry,
                None => break,
            }
        }

        let mut get = client
            .batch_get()
            .get(&table, (1..=5).map(|id| Document::hash_key("Id", id)))
            .projection_expression(&table, "#n", dynawire::Param::new("#n", "Name"));
        let mut names = Vec::new();
        loop {
            let result = get.execute().await?;
            for item in result.items(&table) {
                names.push(item.get_string("Name")?.map(str::to_owned));
            }
            match result.retry() {
                Some(retry) => get = retry,
                None => break,
            }
        }
        names.sort();
        assert_eq!(names.len(), 5);
        assert_eq!(names[0].as_deref(), Some("user-1"));

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_batch_delete() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "batchdel").await;
        client
            .put_item(&table, Document::new().with("Id", 1))
            .execute()
            .await?;

        client
            .batch_write()
            .delete(&table, [Document::hash_key("Id", 1)])
            .execute()
            .await?;

        let result = client
            .get_item(&table, Document::hash_key("Id", 1))
            .consistent_read(true)
            .execute()
            .await?;
        assert!(result.item.is_none());

        cleanup_table(&client, &table).await;
        Ok(())
    }
}

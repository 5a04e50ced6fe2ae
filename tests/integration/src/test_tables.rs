//! Table management.

#[cfg(test)]
mod tests {
    use dynawire::ErrorKind;

    use crate::{cleanup_table, client, create_hash_table};

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_describe_created_table() -> anyhow::Result<()> {
        let client = client();
        let table = create_hash_table(&client, "describe").await;

        let description = client.describe_table(&table).await?;
        assert_eq!(description.table_name, table);
        assert_eq!(description.key_schema.len(), 1);
        assert_eq!(description.key_schema[0].attribute_name, "Id");

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_list_tables_across_pages() -> anyhow::Result<()> {
        let client = client();
        let first = create_hash_table(&client, "list").await;
        let second = create_hash_table(&client, "list").await;

        let mut names = Vec::new();
        let mut page = client.list_tables().limit(1).execute().await?;
        loop {
            names.extend(page.table_names.iter().cloned());
            match page.next() {
                Some(next) => page = next.execute().await?,
                None => break,
            }
        }
        assert!(names.contains(&first));
        assert!(names.contains(&second));

        cleanup_table(&client, &first).await;
        cleanup_table(&client, &second).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_report_missing_table() {
        let client = client();
        let err = client.describe_table("test-does-not-exist").await.unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ResourceNotFound));
    }
}

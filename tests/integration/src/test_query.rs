//! Query and scan, including pagination.

#[cfg(test)]
mod tests {
    use dynawire::{Document, Param};

    use crate::{cleanup_table, client, create_range_table};

    async fn seed(client: &dynawire::Client, table: &str, owner: &str, count: i64) {
        for seq in 0..count {
            client
                .put_item(
                    table,
                    Document::new()
                        .with("Owner", owner)
                        .with("Seq", seq)
                        .with("Even", seq % 2 == 0),
                )
                .execute()
                .await
                .unwrap_or_else(|e| panic!("failed to seed item {seq}: {e}"));
        }
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_page_through_query() -> anyhow::Result<()> {
        let client = client();
        let table = create_range_table(&client, "query").await;
        seed(&client, &table, "alice", 7).await;
        seed(&client, &table, "bob", 2).await;

        let query = client
            .query(&table)
            .key_condition_expression(
                "#o = :o",
                [Param::new("#o", "Owner"), Param::new(":o", "alice")],
            )
            .limit(3);

        let mut seen = Vec::new();
        let mut page = query.execute().await?;
        loop {
            for item in &page.items {
                seen.push(item.get_number("Seq")?.map(|n| n.to_i64()).transpose()?);
            }
            match page.next() {
                Some(next) => page = next.execute().await?,
                None => break,
            }
        }
        assert_eq!(seen, (0..7).map(Some).collect::<Vec<_>>());

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_query_descending_with_filter() -> anyhow::Result<()> {
        let client = client();
        let table = create_range_table(&client, "desc").await;
        seed(&client, &table, "carol", 6).await;

        let page = client
            .query(&table)
            .key_condition_expression(
                "#o = :o",
                [Param::new("#o", "Owner"), Param::new(":o", "carol")],
            )
            .filter_expression("Even = :t", Param::new(":t", true))
            .desc()
            .execute()
            .await?;

        let seqs = page
            .items
            .iter()
            .map(|item| item.get_number("Seq").map(|n| n.map(|n| n.as_str().to_owned())))
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(seqs, vec![Some("4".to_owned()), Some("2".to_owned()), Some("0".to_owned())]);
        assert_eq!(page.count, 3);
        assert_eq!(page.scanned_count, 6);

        cleanup_table(&client, &table).await;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_scan_all_pages() -> anyhow::Result<()> {
        let client = client();
        let table = create_range_table(&client, "scan").await;
        seed(&client, &table, "dave", 5).await;

        let mut total = 0;
        let mut page = client.scan(&table).limit(2).execute().await?;
        loop {
            total += page.items.len();
            match page.next() {
                Some(next) => page = next.execute().await?,
                None => break,
            }
        }
        assert_eq!(total, 5);

        cleanup_table(&client, &table).await;
        Ok(())
    }
}

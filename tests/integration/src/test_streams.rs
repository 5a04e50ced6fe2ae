//! Following a table's change stream.

#[cfg(test)]
mod tests {
    use dynawire::Document;
    use dynawire::input::CreateTableInput;
    use dynawire::types::{AttributeType, StreamSpecification, StreamViewType};
    use dynawire_streams::{
        DescribeStreamInput, GetRecordsInput, GetShardIteratorInput, StreamsClient,
    };

    use crate::{cleanup_table, client, config, test_table_name};

    #[tokio::test]
    #[ignore = "requires running endpoint"]
    async fn test_should_read_insert_record_from_stream() -> anyhow::Result<()> {
        let client = client();
        let streams = StreamsClient::from_config(&config())?;
        let table = test_table_name("streams");

        let mut input = CreateTableInput::new(&table).hash_key("Id", AttributeType::N);
        input.stream_specification = Some(StreamSpecification {
            stream_enabled: true,
            stream_view_type: Some(StreamViewType::NewImage),
        });
        let description = client.create_table(input).await?;
        let arn = description.latest_stream_arn.expect("stream should be enabled");

        client
            .put_item(&table, Document::new().with("Id", 1).with("Name", "Bob"))
            .execute()
            .await?;

        let stream = streams
            .describe_stream(&DescribeStreamInput::new(&arn))
            .await?
            .stream_description;
        let shard = stream.shards.first().expect("stream should have a shard");
        let iterator = streams
            .get_shard_iterator(&GetShardIteratorInput::trim_horizon(&arn, &shard.shard_id))
            .await?
            .shard_iterator
            .expect("open shard should have an iterator");

        let page = streams.get_records(&GetRecordsInput::new(iterator)).await?;
        let record = page.records.first().expect("insert should produce a record");
        assert_eq!(record.event_name, "INSERT");
        let image = record.dynamodb.new_image.as_ref().expect("new image requested");
        assert_eq!(image.get_string("Name")?, Some("Bob"));

        cleanup_table(&client, &table).await;
        Ok(())
    }
}

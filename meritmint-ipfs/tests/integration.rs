use meritmint_ipfs::{gateway_url, MemoryPublisher, PublishError, Web3StorageClient};
use meritmint_registry::mint::MetadataPublisher;
use meritmint_registry::state::{Attribute, NftMetadata};

fn metadata() -> NftMetadata {
    NftMetadata {
        name: "Hackathon X".to_string(),
        description: "A fine achievement".to_string(),
        attributes: vec![Attribute::new("Type", "Hackathon")],
    }
}

#[test]
fn test_gateway_url_shape() {
    assert_eq!(
        gateway_url("QmExampleCid"),
        "https://QmExampleCid.ipfs.w3s.link"
    );
}

#[test]
fn test_memory_publisher_records_metadata() {
    let publisher = MemoryPublisher::new("QmFixed");
    let cid = publisher.publish(&metadata()).unwrap();
    assert_eq!(cid, "QmFixed");

    let cid = publisher.publish(&metadata()).unwrap();
    assert_eq!(cid, "QmFixed");
    assert_eq!(publisher.published(), vec![metadata(), metadata()]);
}

#[test]
fn test_client_unreachable_endpoint_fails() {
    // Nothing listens on this port; the publish must surface an error, not
    // hang or fabricate an identifier.
    let client = Web3StorageClient::with_endpoint("token", "http://127.0.0.1:9/upload");
    assert_eq!(client.endpoint(), "http://127.0.0.1:9/upload");

    let err = client.publish(&metadata()).unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_error_messages_are_distinguishable() {
    let status = PublishError::Status { code: 503 };
    assert_eq!(status.to_string(), "upload rejected with status 503");

    let decode = PublishError::Decode("missing field `cid`".to_string());
    assert!(decode.to_string().contains("missing cid"));
}

//! Object round-trip tests.

#[cfg(test)]
mod tests {
    use http::HeaderMap;
    use minis3_client::S3Object;

    use crate::client;

    #[test]
    fn test_should_round_trip_object_body() {
        let client = client();
        client.create_bucket("bucket", HeaderMap::new()).unwrap();
        client
            .put("bucket", "hello.txt", "hello world", HeaderMap::new())
            .unwrap();

        let get = client.get("bucket", "hello.txt", HeaderMap::new()).unwrap();
        assert!(get.response.is_success());
        assert_eq!(get.object.data.as_ref(), b"hello world");
        assert!(get.object.metadata.is_empty());
    }

    #[test]
    fn test_should_round_trip_metadata() {
        let client = client();
        client.create_bucket("bucket", HeaderMap::new()).unwrap();

        let object = S3Object::new(
            "payload",
            std::collections::HashMap::from([
                ("author".to_owned(), "alice".to_owned()),
                ("rating".to_owned(), "5".to_owned()),
            ]),
        );
        client.put("bucket", "meta.txt", object, HeaderMap::new()).unwrap();

        let get = client.get("bucket", "meta.txt", HeaderMap::new()).unwrap();
        assert_eq!(get.object.metadata.len(), 2);
        assert_eq!(get.object.metadata["author"], "alice");
        assert_eq!(get.object.metadata["rating"], "5");
    }

    #[test]
    fn test_should_round_trip_key_needing_escapes() {
        let client = client();
        client.create_bucket("bucket", HeaderMap::new()).unwrap();
        client
            .put("bucket", "dir with space/file+plus.txt", "x", HeaderMap::new())
            .unwrap();

        let get = client
            .get("bucket", "dir with space/file+plus.txt", HeaderMap::new())
            .unwrap();
        assert!(get.response.is_success());
        assert_eq!(get.object.data.as_ref(), b"x");
    }

    #[test]
    fn test_should_report_missing_object_status() {
        let client = client();
        client.create_bucket("bucket", HeaderMap::new()).unwrap();

        let get = client.get("bucket", "absent", HeaderMap::new()).unwrap();
        assert_eq!(get.response.status, http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_should_delete_object() {
        let client = client();
        client.create_bucket("bucket", HeaderMap::new()).unwrap();
        client.put("bucket", "gone.txt", "x", HeaderMap::new()).unwrap();

        let delete = client.delete("bucket", "gone.txt", HeaderMap::new()).unwrap();
        assert!(delete.is_success());

        let get = client.get("bucket", "gone.txt", HeaderMap::new()).unwrap();
        assert_eq!(get.response.status, http::StatusCode::NOT_FOUND);
    }
}

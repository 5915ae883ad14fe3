//! Integration tests for the CRM adapter
//!
//! Each test runs the adapter over real HTTP against `FakeCrmServer`.

use axum::http::{Method, StatusCode};
use core_kernel::{PortError, RecordId};
use domain_doctor::record::property;
use domain_doctor::{DoctorPort, DoctorQuery, HubSpotAdapter, HubSpotConfig, NewDoctor};
use serde_json::json;
use test_utils::{unreachable_base_url, DoctorFixtures, FakeCrmServer};

fn adapter_for(server: &FakeCrmServer) -> HubSpotAdapter {
    HubSpotAdapter::new(HubSpotConfig::new(server.token()).with_base_url(server.base_url()))
        .expect("Failed to build adapter")
}

mod list_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_sends_query_and_bearer_token() {
        let server = FakeCrmServer::start().await;
        server.seed(&DoctorFixtures::jane_doe_properties());
        let adapter = adapter_for(&server);

        let records = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap();
        assert_eq!(records.len(), 1);

        let requests = server.requests();
        let request = &requests[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/crm/v3/objects/doctors");
        assert_eq!(request.query["limit"], "20");
        assert_eq!(
            request.query["properties"],
            "doctor_id,doctor_full_name,doctor_medical_specialty"
        );
        assert_eq!(request.query["archived"], "false");
        assert_eq!(request.authorization.as_deref(), Some("Bearer pat-test-token"));
    }

    #[tokio::test]
    async fn test_list_empty_store_is_ok() {
        let server = FakeCrmServer::start().await;
        let adapter = adapter_for(&server);

        let records = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_excludes_archived_records() {
        let server = FakeCrmServer::start().await;
        server.seed(&DoctorFixtures::jane_doe_properties());
        server.seed_archived(&DoctorFixtures::john_smith_properties());
        let adapter = adapter_for(&server);

        let records = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_name(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_list_honours_limit() {
        let server = FakeCrmServer::start().await;
        for _ in 0..5 {
            server.seed(&DoctorFixtures::jane_doe_properties());
        }
        let adapter = adapter_for(&server);

        let records = adapter.list_doctors(&DoctorQuery::listing(3)).await.unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_list_keeps_unset_and_system_properties() {
        let server = FakeCrmServer::start().await;
        server.seed(&[(property::DOCTOR_FULL_NAME, "No Id Yet")]);
        let adapter = adapter_for(&server);

        let records = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap();
        let record = &records[0];
        assert_eq!(record.full_name(), Some("No Id Yet"));
        assert_eq!(record.doctor_id(), None);
        assert!(record.properties.contains_key(property::DOCTOR_ID));
        assert!(record.properties.contains_key("hs_object_id"));
    }

    #[tokio::test]
    async fn test_list_upstream_failure_carries_status_and_body() {
        let server = FakeCrmServer::start().await;
        server.fail_next(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "status": "error", "category": "RATE_LIMITS" }),
        );
        let adapter = adapter_for(&server);

        let err = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap_err();
        match err {
            PortError::Upstream { status_code, body } => {
                assert_eq!(status_code, 429);
                assert!(body.contains("RATE_LIMITS"));
            }
            other => panic!("Expected Upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_token_is_upstream_unauthorized() {
        let server = FakeCrmServer::start().await;
        let adapter = HubSpotAdapter::new(
            HubSpotConfig::new("wrong-token").with_base_url(server.base_url()),
        )
        .unwrap();

        let err = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        let base_url = unreachable_base_url().await;
        let adapter =
            HubSpotAdapter::new(HubSpotConfig::new("t").with_base_url(base_url)).unwrap();

        let err = adapter.list_doctors(&DoctorQuery::listing(20)).await.unwrap_err();
        assert!(err.is_transport(), "Expected transport error, got {:?}", err);
    }
}

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_passes_properties_through() {
        let server = FakeCrmServer::start().await;
        let adapter = adapter_for(&server);

        let id = adapter.create_doctor(&DoctorFixtures::jane_doe()).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(
            requests[0].body,
            Some(json!({ "properties": {
                "doctor_full_name": "Jane Doe",
                "doctor_id": "D100",
                "doctor_medical_specialty": "Cardiology"
            }}))
        );

        let stored = server.stored_properties(id.as_str()).unwrap();
        assert_eq!(stored["doctor_full_name"], "Jane Doe");
        assert_eq!(stored["doctor_id"], "D100");
        assert_eq!(stored["doctor_medical_specialty"], "Cardiology");
    }

    #[tokio::test]
    async fn test_create_does_not_validate_locally() {
        let server = FakeCrmServer::start().await;
        let adapter = adapter_for(&server);

        let id = adapter.create_doctor(&NewDoctor::new()).await.unwrap();
        let stored = server.stored_properties(id.as_str()).unwrap();
        assert!(!stored.contains_key(property::DOCTOR_FULL_NAME));
        assert_eq!(server.record_count(), 1);
    }

    #[tokio::test]
    async fn test_create_reads_only_the_new_id() {
        let server = FakeCrmServer::start().await;
        server.respond_next(
            StatusCode::CREATED,
            json!({ "id": "77", "createdAt": "not-a-date", "properties": null }),
        );
        let adapter = adapter_for(&server);

        let id = adapter.create_doctor(&DoctorFixtures::jane_doe()).await.unwrap();
        assert_eq!(id, RecordId::new("77"));
    }

    #[tokio::test]
    async fn test_create_response_without_id_is_transformation_error() {
        let server = FakeCrmServer::start().await;
        server.respond_next(StatusCode::CREATED, json!({ "status": "created" }));
        let adapter = adapter_for(&server);

        let err = adapter.create_doctor(&DoctorFixtures::jane_doe()).await.unwrap_err();
        assert!(
            matches!(err, PortError::Transformation { .. }),
            "Expected Transformation error, got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_create_rejected_by_store() {
        let server = FakeCrmServer::start().await;
        server.fail_next(
            StatusCode::BAD_REQUEST,
            json!({ "status": "error", "category": "VALIDATION_ERROR" }),
        );
        let adapter = adapter_for(&server);

        let err = adapter.create_doctor(&DoctorFixtures::jane_doe()).await.unwrap_err();
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(server.record_count(), 0);
    }
}

mod get_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_existing_record() {
        let server = FakeCrmServer::start().await;
        let id = server.seed(&DoctorFixtures::jane_doe_properties());
        let adapter = adapter_for(&server);

        let record = adapter
            .get_doctor(&RecordId::new(id.clone()), &DoctorQuery::detail())
            .await
            .unwrap();
        assert_eq!(record.id.as_str(), id);
        assert_eq!(record.full_name(), Some("Jane Doe"));

        let requests = server.requests();
        assert_eq!(requests[0].path, format!("/crm/v3/objects/doctors/{}", id));
        assert_eq!(
            requests[0].query["properties"],
            "doctor_full_name,doctor_medical_specialty,doctor_id"
        );
        assert_eq!(requests[0].query["archived"], "false");
        assert!(!requests[0].query.contains_key("limit"));
    }

    #[tokio::test]
    async fn test_get_unknown_record_is_not_found() {
        let server = FakeCrmServer::start().await;
        let adapter = adapter_for(&server);

        let err = adapter
            .get_doctor(&RecordId::new("999999"), &DoctorQuery::detail())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_archived_record_is_not_found() {
        let server = FakeCrmServer::start().await;
        let id = server.seed_archived(&DoctorFixtures::jane_doe_properties());
        let adapter = adapter_for(&server);

        let err = adapter
            .get_doctor(&RecordId::new(id), &DoctorQuery::detail())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

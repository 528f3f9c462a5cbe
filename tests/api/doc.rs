mod openapi_document {
    use actix_web::test;
    use serde_json::Value;

    use crate::init_test_service;
    use crate::integration_helpers::app::empty_store;

    #[test_log::test(actix_web::test)]
    async fn test_served() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::with_uri("/api-spec").to_request();
        let openapi: Value = test::call_and_read_body_json(&service, req).await;

        assert!(openapi["openapi"].as_str().unwrap().starts_with("3."));
        assert!(openapi["paths"]["/pokemon"].is_object());
        assert!(openapi["paths"]["/pokemon/{id}"].is_object());
        assert!(openapi["paths"]["/pokemon/nombre/{name}"].is_object());
    }
}

mod viewers {
    use actix_web::test;

    use crate::init_test_service;
    use crate::integration_helpers::app::empty_store;

    #[test_log::test(actix_web::test)]
    async fn test_swagger_ui() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::with_uri("/api-doc/").to_request();
        let result = test::call_service(&service, req).await;

        assert!(result.status().is_success());
    }

    #[test_log::test(actix_web::test)]
    async fn test_rapidoc() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::with_uri("/api-rapidoc").to_request();
        let result = test::call_service(&service, req).await;

        assert!(result.status().is_success());
    }

    #[test_log::test(actix_web::test)]
    async fn test_redoc() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::with_uri("/api-redoc").to_request();
        let result = test::call_service(&service, req).await;

        assert!(result.status().is_success());
        let body = test::read_body(result).await;
        assert!(String::from_utf8_lossy(&body).contains("redoc"));
    }
}

mod cors {
    use actix_web::http::{header, Method};
    use actix_web::test;

    use crate::init_test_service;
    use crate::integration_helpers::app::empty_store;

    #[test_log::test(actix_web::test)]
    async fn test_preflight_allows_patch() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/pokemon/1")
            .insert_header((header::ORIGIN, "https://pokedex.example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert!(result.status().is_success());
        assert_eq!(
            "https://pokedex.example.com",
            result
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap()
                .to_str()
                .unwrap()
        );
    }
}

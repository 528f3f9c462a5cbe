mod list {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::api::errors::ErrorResponse;
    use pokemon_api::models::pokemon::Pokemon;

    use crate::init_test_service;
    use crate::integration_helpers::app::{empty_store, failing_store, seeded_store};

    #[test_log::test(actix_web::test)]
    async fn test_empty_list() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemon: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert!(pokemon.is_empty());
    }

    #[test_log::test(actix_web::test)]
    async fn test_ordered_by_id() {
        init_test_service!(service, seeded_store(5));

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemon: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;

        assert_eq!(vec![1, 2, 3, 4, 5], pokemon.iter().map(|p| p.id).collect::<Vec<_>>());
        assert_eq!("Pikafoo_3", pokemon[2].name);
    }

    #[test_log::test(actix_web::test)]
    async fn test_broken_store() {
        init_test_service!(service, failing_store());

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Failed to fetch Pokemon list.", error_response.error);
        assert_eq!(None, error_response.details);
        assert_eq!(None, error_response.internal_error);
    }
}

mod get_by_id {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::api::errors::ErrorResponse;
    use pokemon_api::models::pokemon::{CreatePokemon, Pokemon};

    use crate::init_test_service;
    use crate::integration_helpers::app::{failing_store, seeded_store};
    use crate::integration_helpers::factories::pokemon::build_create_pokemons;

    #[test_log::test(actix_web::test)]
    async fn test_exists() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri("/pokemon/2").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(2, api_pokemon.id);
        assert_eq!(build_create_pokemons(2).remove(1), CreatePokemon::from(api_pokemon));
    }

    #[test_log::test(actix_web::test)]
    async fn test_does_not_exist() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}", i64::MAX)).to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Pokemon not found.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_invalid_path_param() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri("/pokemon/pikachu").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Invalid path parameter.", error_response.error);
        assert!(error_response.details.is_some());
    }

    #[test_log::test(actix_web::test)]
    async fn test_negative_id() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri("/pokemon/-1").to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_broken_store() {
        init_test_service!(service, failing_store());

        let req = test::TestRequest::with_uri("/pokemon/1").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Failed to fetch Pokemon.", error_response.error);
    }
}

mod get_by_name {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::models::pokemon::Pokemon;

    use crate::init_test_service;
    use crate::integration_helpers::app::seeded_store;

    #[test_log::test(actix_web::test)]
    async fn test_exists() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri("/pokemon/nombre/Pikafoo_3").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;

        assert_eq!(3, api_pokemon.id);
        assert_eq!("Pikafoo_3", api_pokemon.name);
    }

    #[test_log::test(actix_web::test)]
    async fn test_exact_match_only() {
        init_test_service!(service, seeded_store(3));

        let req = test::TestRequest::with_uri("/pokemon/nombre/Pikafoo").to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }
}

mod create {
    use actix_web::http::header::ContentType;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::api::errors::ErrorResponse;
    use pokemon_api::models::message::Created;
    use pokemon_api::models::pokemon::{CreatePokemon, Pokemon};
    use serde_json::json;

    use crate::init_test_service;
    use crate::integration_helpers::app::{empty_store, failing_store, seeded_store};
    use crate::integration_helpers::factories::pokemon::build_create_pokemon;

    #[test_log::test(actix_web::test)]
    async fn test_valid() {
        init_test_service!(service, seeded_store(2));

        let new_pokemon = CreatePokemon { name: "Pikabar".into(), ..build_create_pokemon() };
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&new_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CREATED, result.status());

        let created: Created = test::read_body_json(result).await;
        assert_eq!(Created::new(3), created);

        let req = test::TestRequest::with_uri("/pokemon/3").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(new_pokemon, api_pokemon.into());
    }

    #[test_log::test(actix_web::test)]
    async fn test_spanish_field_names() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(json!({
                "nombre": "Pikabaz",
                "tipos": "Electric",
                "descripcion": "Pikabaz only speaks Spanish.",
                "imagen": "https://img.example.com/pikabaz.png",
            }))
            .to_request();
        let created: Created = test::call_and_read_body_json(&service, req).await;

        let req = test::TestRequest::with_uri(&format!("/pokemon/{}", created.id)).to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!("Pikabaz", api_pokemon.name);
        assert_eq!("Electric", api_pokemon.types);
    }

    #[test_log::test(actix_web::test)]
    async fn test_missing_field() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(json!({ "name": "Pikabar", "types": "Electric" }))
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemon: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;
        assert!(pokemon.is_empty());
    }

    #[test_log::test(actix_web::test)]
    async fn test_empty_field() {
        init_test_service!(service, empty_store());

        let new_pokemon = CreatePokemon { description: String::new(), ..build_create_pokemon() };
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&new_pokemon)
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("All specified fields are required and must not be empty.", error_response.error);

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemon: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;
        assert!(pokemon.is_empty());
    }

    #[test_log::test(actix_web::test)]
    async fn test_malformed_body() {
        init_test_service!(service, empty_store());

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .insert_header(ContentType::json())
            .set_payload("{ \"name\": ")
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Invalid request body.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_duplicate_name() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(build_create_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::CONFLICT, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("A Pokemon with this name already exists.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_broken_store() {
        init_test_service!(service, failing_store());

        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(build_create_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Failed to create Pokemon.", error_response.error);
    }
}

mod update_by_id {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::api::errors::ErrorResponse;
    use pokemon_api::models::message::Confirmation;
    use pokemon_api::models::pokemon::Pokemon;
    use serde_json::json;

    use crate::init_test_service;
    use crate::integration_helpers::app::{failing_store, seeded_store};
    use crate::integration_helpers::factories::pokemon::{
        build_create_pokemons, build_patch_pokemon,
    };

    #[test_log::test(actix_web::test)]
    async fn test_partial_update() {
        init_test_service!(service, seeded_store(2));

        let patch_pokemon = build_patch_pokemon();
        let req = test::TestRequest::patch()
            .uri("/pokemon/2")
            .set_json(&patch_pokemon)
            .to_request();
        let confirmation: Confirmation = test::call_and_read_body_json(&service, req).await;
        assert_eq!(Confirmation::new(Confirmation::UPDATED), confirmation);

        let req = test::TestRequest::with_uri("/pokemon/2").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        let orig_pokemon = build_create_pokemons(2).remove(1);
        assert_eq!(orig_pokemon.name, api_pokemon.name);
        assert_eq!(patch_pokemon.types, Some(api_pokemon.types));
        assert_eq!(patch_pokemon.description, Some(api_pokemon.description));
        assert_eq!(orig_pokemon.image, api_pokemon.image);
    }

    #[test_log::test(actix_web::test)]
    async fn test_unknown_fields_ignored() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::patch()
            .uri("/pokemon/1")
            .set_json(json!({ "id": 42, "image": "https://img.example.com/new.png" }))
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::OK, result.status());

        let req = test::TestRequest::with_uri("/pokemon/1").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(1, api_pokemon.id);
        assert_eq!("https://img.example.com/new.png", api_pokemon.image);
    }

    #[test_log::test(actix_web::test)]
    async fn test_empty_update() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::patch()
            .uri("/pokemon/1")
            .set_json(json!({ "foo": "bar" }))
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("No fields to update.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_empty_value() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::patch()
            .uri("/pokemon/1")
            .set_json(json!({ "name": "" }))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_does_not_exist() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::patch()
            .uri("/pokemon/42")
            .set_json(build_patch_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Pokemon not found.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_invalid_path_param() {
        init_test_service!(service, seeded_store(1));

        let req = test::TestRequest::patch()
            .uri("/pokemon/one")
            .set_json(build_patch_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_rename_to_existing_name() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::patch()
            .uri("/pokemon/2")
            .set_json(json!({ "nombre": "Pikafoo_1" }))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::CONFLICT, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_broken_store() {
        init_test_service!(service, failing_store());

        let req = test::TestRequest::patch()
            .uri("/pokemon/1")
            .set_json(build_patch_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Failed to update Pokemon.", error_response.error);
    }
}

mod update_by_name {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::models::message::Confirmation;
    use pokemon_api::models::pokemon::Pokemon;
    use serde_json::json;

    use crate::init_test_service;
    use crate::integration_helpers::app::seeded_store;
    use crate::integration_helpers::factories::pokemon::build_patch_pokemon;

    #[test_log::test(actix_web::test)]
    async fn test_rename() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::patch()
            .uri("/pokemon/nombre/Pikafoo_1")
            .set_json(json!({ "name": "Pikabar" }))
            .to_request();
        let confirmation: Confirmation = test::call_and_read_body_json(&service, req).await;
        assert_eq!(Confirmation::UPDATED, confirmation.message);

        let req = test::TestRequest::with_uri("/pokemon/nombre/Pikabar").to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(1, api_pokemon.id);
    }

    #[test_log::test(actix_web::test)]
    async fn test_does_not_exist() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::patch()
            .uri("/pokemon/nombre/Pikabar")
            .set_json(build_patch_pokemon())
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_empty_update() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::patch()
            .uri("/pokemon/nombre/Pikafoo_1")
            .set_json(json!({}))
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }
}

mod delete_by_id {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::api::errors::ErrorResponse;
    use pokemon_api::models::message::Confirmation;

    use crate::init_test_service;
    use crate::integration_helpers::app::{failing_store, seeded_store};

    #[test_log::test(actix_web::test)]
    async fn test_exists() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::delete().uri("/pokemon/1").to_request();
        let confirmation: Confirmation = test::call_and_read_body_json(&service, req).await;
        assert_eq!(Confirmation::new(Confirmation::DELETED), confirmation);

        let req = test::TestRequest::with_uri("/pokemon/1").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_does_not_exist() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::delete().uri("/pokemon/3").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Pokemon not found.", error_response.error);
    }

    #[test_log::test(actix_web::test)]
    async fn test_invalid_path_param() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::delete().uri("/pokemon/1.5").to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::BAD_REQUEST, result.status());
    }

    #[test_log::test(actix_web::test)]
    async fn test_broken_store() {
        init_test_service!(service, failing_store());

        let req = test::TestRequest::delete().uri("/pokemon/1").to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, result.status());

        let error_response: ErrorResponse = test::read_body_json(result).await;
        assert_eq!("Failed to delete Pokemon.", error_response.error);
    }
}

mod delete_by_name {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::models::message::Confirmation;
    use pokemon_api::models::pokemon::Pokemon;

    use crate::init_test_service;
    use crate::integration_helpers::app::seeded_store;

    #[test_log::test(actix_web::test)]
    async fn test_exists() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::delete()
            .uri("/pokemon/nombre/Pikafoo_2")
            .to_request();
        let confirmation: Confirmation = test::call_and_read_body_json(&service, req).await;
        assert_eq!(Confirmation::DELETED, confirmation.message);

        let req = test::TestRequest::with_uri("/pokemon").to_request();
        let pokemon: Vec<Pokemon> = test::call_and_read_body_json(&service, req).await;
        assert_eq!(vec![1], pokemon.iter().map(|p| p.id).collect::<Vec<_>>());
    }

    #[test_log::test(actix_web::test)]
    async fn test_does_not_exist() {
        init_test_service!(service, seeded_store(2));

        let req = test::TestRequest::delete()
            .uri("/pokemon/nombre/Pikafoo_3")
            .to_request();
        let result = test::call_service(&service, req).await;

        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }
}

mod round_trip {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use pokemon_api::models::message::{Confirmation, Created};
    use pokemon_api::models::pokemon::Pokemon;
    use serde_json::json;

    use crate::init_test_service;
    use crate::integration_helpers::app::empty_store;
    use crate::integration_helpers::factories::pokemon::build_create_pokemon;

    #[test_log::test(actix_web::test)]
    async fn test_create_update_delete() {
        init_test_service!(service, empty_store());

        let new_pokemon = build_create_pokemon();
        let req = test::TestRequest::post()
            .uri("/pokemon")
            .set_json(&new_pokemon)
            .to_request();
        let created: Created = test::call_and_read_body_json(&service, req).await;
        let uri = format!("/pokemon/{}", created.id);

        let req = test::TestRequest::with_uri(&uri).to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!(new_pokemon, api_pokemon.into());

        let req = test::TestRequest::patch()
            .uri(&uri)
            .set_json(json!({ "types": "Grass" }))
            .to_request();
        let _: Confirmation = test::call_and_read_body_json(&service, req).await;

        let req = test::TestRequest::with_uri(&uri).to_request();
        let api_pokemon: Pokemon = test::call_and_read_body_json(&service, req).await;
        assert_eq!("Grass", api_pokemon.types);
        assert_eq!(new_pokemon.name, api_pokemon.name);

        let req = test::TestRequest::delete().uri(&uri).to_request();
        let _: Confirmation = test::call_and_read_body_json(&service, req).await;

        let req = test::TestRequest::with_uri(&uri).to_request();
        let result = test::call_service(&service, req).await;
        assert_eq!(StatusCode::NOT_FOUND, result.status());
    }
}

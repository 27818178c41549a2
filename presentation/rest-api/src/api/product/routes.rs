use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_all::{GetAllProductsParams, GetAllProductsUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};
use business::domain::product::use_cases::validate::{
    ValidateProductsParams, ValidateProductsUseCase,
};
use business::domain::shared::pagination::PageRequest;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    CreateProductRequest, ProductPageResponse, ProductResponse, UpdateProductRequest,
    ValidateProductsRequest, decimal_from_f64,
};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    validate_use_case: Arc<dyn ValidateProductsUseCase>,
}

impl ProductApi {
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        validate_use_case: Arc<dyn ValidateProductsUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            validate_use_case,
        }
    }
}

/// Product catalog API
///
/// Endpoints for creating, listing, updating, removing and validating products.
#[OpenApi]
impl ProductApi {
    /// Create a new product
    ///
    /// New products are always created as available.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(&self, body: Json<CreateProductRequest>) -> CreateProductResponse {
        let Some(price) = decimal_from_f64(body.0.price) else {
            return CreateProductResponse::BadRequest(ErrorResponse::bad_request(
                "product.invalid_price",
            ));
        };

        let params = CreateProductParams {
            name: body.0.name,
            price,
        };

        match self.create_use_case.execute(params).await {
            Ok(product) => CreateProductResponse::Created(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateProductResponse::BadRequest(json),
                    _ => CreateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// List available products
    ///
    /// Returns one page of available products plus the aggregate totals.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn get_all_products(
        &self,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> GetAllProductsResponse {
        let pagination = PageRequest::new(
            page.0.unwrap_or(PageRequest::DEFAULT_PAGE),
            limit.0.unwrap_or(PageRequest::DEFAULT_LIMIT),
        );
        if pagination.page < 1 || pagination.limit < 1 {
            return GetAllProductsResponse::BadRequest(ErrorResponse::bad_request(
                "pagination.page_and_limit_must_be_positive",
            ));
        }

        match self
            .get_all_use_case
            .execute(GetAllProductsParams { pagination })
            .await
        {
            Ok(page) => GetAllProductsResponse::Ok(Json(page.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    ///
    /// Removed products are reported as not found.
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(&self, id: Path<i64>) -> GetProductByIdResponse {
        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: id.0 })
            .await
        {
            Ok(product) => GetProductByIdResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a product
    ///
    /// Applies the fields present in the body. An `id` in the body is ignored.
    #[oai(path = "/products/:id", method = "patch", tag = "ApiTags::Products")]
    async fn update_product(
        &self,
        id: Path<i64>,
        body: Json<UpdateProductRequest>,
    ) -> UpdateProductResponse {
        let Some(patch) = body.0.into_patch() else {
            return UpdateProductResponse::BadRequest(ErrorResponse::bad_request(
                "product.invalid_price",
            ));
        };

        match self
            .update_use_case
            .execute(UpdateProductParams { id: id.0, patch })
            .await
        {
            Ok(product) => UpdateProductResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateProductResponse::BadRequest(json),
                    404 => UpdateProductResponse::NotFound(json),
                    _ => UpdateProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Remove a product
    ///
    /// Marks the product unavailable; the record is kept in storage.
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(&self, id: Path<i64>) -> DeleteProductResponse {
        match self
            .delete_use_case
            .execute(DeleteProductParams { id: id.0 })
            .await
        {
            Ok(product) => DeleteProductResponse::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => DeleteProductResponse::NotFound(json),
                    _ => DeleteProductResponse::InternalError(json),
                }
            }
        }
    }

    /// Validate a batch of product ids
    ///
    /// Succeeds only when every distinct id exists in storage.
    #[oai(path = "/products/validate", method = "post", tag = "ApiTags::Products")]
    async fn validate_products(&self, body: Json<ValidateProductsRequest>) -> ValidateProductsResponse {
        match self
            .validate_use_case
            .execute(ValidateProductsParams { ids: body.0.ids })
            .await
        {
            Ok(products) => ValidateProductsResponse::Ok(Json(
                products.into_iter().map(ProductResponse::from).collect(),
            )),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ValidateProductsResponse::BadRequest(json),
                    _ => ValidateProductsResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<ProductPageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ValidateProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use business::domain::product::errors::ProductError;
    use business::domain::product::model::Product;
    use business::domain::shared::pagination::Page;
    use chrono::Utc;
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;

    mock! {
        pub Create {}

        #[async_trait]
        impl CreateProductUseCase for Create {
            async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub GetAll {}

        #[async_trait]
        impl GetAllProductsUseCase for GetAll {
            async fn execute(&self, params: GetAllProductsParams) -> Result<Page<Product>, ProductError>;
        }
    }

    mock! {
        pub GetById {}

        #[async_trait]
        impl GetProductByIdUseCase for GetById {
            async fn execute(&self, params: GetProductByIdParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub Update {}

        #[async_trait]
        impl UpdateProductUseCase for Update {
            async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub Delete {}

        #[async_trait]
        impl DeleteProductUseCase for Delete {
            async fn execute(&self, params: DeleteProductParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub Validate {}

        #[async_trait]
        impl ValidateProductsUseCase for Validate {
            async fn execute(&self, params: ValidateProductsParams) -> Result<Vec<Product>, ProductError>;
        }
    }

    #[derive(Default)]
    struct Mocks {
        create: MockCreate,
        get_all: MockGetAll,
        get_by_id: MockGetById,
        update: MockUpdate,
        delete: MockDelete,
        validate: MockValidate,
    }

    impl Mocks {
        fn into_client(self) -> TestClient<poem::Route> {
            let api = ProductApi::new(
                Arc::new(self.create),
                Arc::new(self.get_all),
                Arc::new(self.get_by_id),
                Arc::new(self.update),
                Arc::new(self.delete),
                Arc::new(self.validate),
            );
            let service = OpenApiService::new(api, "Products", "test");
            TestClient::new(poem::Route::new().nest("/", service))
        }
    }

    fn product(id: i64, available: bool) -> Product {
        let now = Utc::now();
        Product::from_repository(
            id,
            "Trackpad".to_string(),
            BigDecimal::from(80),
            available,
            now,
            now,
        )
    }

    #[tokio::test]
    async fn should_respond_not_found_with_structured_body() {
        let mut mocks = Mocks::default();
        mocks
            .get_by_id
            .expect_execute()
            .returning(|params| Err(ProductError::NotFound(params.id)));
        let client = mocks.into_client();

        let response = client.get("/products/17").send().await;

        response.assert_status(StatusCode::NOT_FOUND);
        let json = response.json().await;
        let body = json.value().object();
        body.get("status").assert_i64(404);
        body.get("message").assert_string("Product with id 17 not found");
    }

    #[tokio::test]
    async fn should_use_path_id_for_updates() {
        let mut mocks = Mocks::default();
        mocks
            .update
            .expect_execute()
            .withf(|params| params.id == 4 && params.patch.name.as_deref() == Some("Renamed"))
            .returning(|params| {
                let mut updated = product(params.id, true);
                updated.name = params.patch.name.unwrap_or_default();
                Ok(updated)
            });
        let client = mocks.into_client();

        let response = client
            .patch("/products/4")
            .body_json(&serde_json::json!({ "id": 999, "name": "Renamed" }))
            .send()
            .await;

        response.assert_status_is_ok();
        let json = response.json().await;
        let body = json.value().object();
        body.get("id").assert_i64(4);
        body.get("name").assert_string("Renamed");
    }

    #[tokio::test]
    async fn should_report_failed_batch_validation_as_bad_request() {
        let mut mocks = Mocks::default();
        mocks
            .validate
            .expect_execute()
            .withf(|params| params.ids == vec![1, 999])
            .returning(|_| Err(ProductError::ValidationFailed));
        let client = mocks.into_client();

        let response = client
            .post("/products/validate")
            .body_json(&serde_json::json!({ "ids": [1, 999] }))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value()
            .object()
            .get("message")
            .assert_string("Some products were not found");
    }

    #[tokio::test]
    async fn should_list_with_default_pagination_and_camel_case_meta() {
        let mut mocks = Mocks::default();
        mocks
            .get_all
            .expect_execute()
            .withf(|params| params.pagination == PageRequest::new(1, 10))
            .returning(|params| Ok(Page::new(vec![product(1, true)], params.pagination, 1)));
        let client = mocks.into_client();

        let response = client.get("/products").send().await;

        response.assert_status_is_ok();
        let json = response.json().await;
        let body = json.value().object();
        body.get("data").array().assert_len(1);
        let meta = body.get("meta").object();
        meta.get("total").assert_i64(1);
        meta.get("page").assert_i64(1);
        meta.get("lastPage").assert_i64(1);
    }

    #[tokio::test]
    async fn should_reject_non_positive_pagination() {
        let mut mocks = Mocks::default();
        mocks.get_all.expect_execute().never();
        let client = mocks.into_client();

        let response = client
            .get("/products")
            .query("page", &0)
            .query("limit", &10)
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_removed_product_as_unavailable() {
        let mut mocks = Mocks::default();
        mocks
            .delete
            .expect_execute()
            .returning(|params| Ok(product(params.id, false)));
        let client = mocks.into_client();

        let response = client.delete("/products/9").send().await;

        response.assert_status_is_ok();
        let json = response.json().await;
        json.value().object().get("available").assert_bool(false);
    }

    #[tokio::test]
    async fn should_create_product_with_created_status() {
        let mut mocks = Mocks::default();
        mocks
            .create
            .expect_execute()
            .withf(|params| params.name == "Trackpad" && params.price == BigDecimal::from(80))
            .times(1)
            .returning(|_| Ok(product(1, true)));
        let client = mocks.into_client();

        let response = client
            .post("/products")
            .body_json(&serde_json::json!({ "name": "Trackpad", "price": 80 }))
            .send()
            .await;

        response.assert_status(StatusCode::CREATED);
        let json = response.json().await;
        let body = json.value().object();
        body.get("id").assert_i64(1);
        body.get("available").assert_bool(true);
    }

    #[tokio::test]
    async fn should_reject_non_finite_price_before_creating() {
        let mut mocks = Mocks::default();
        mocks.create.expect_execute().never();
        let api = ProductApi::new(
            Arc::new(mocks.create),
            Arc::new(mocks.get_all),
            Arc::new(mocks.get_by_id),
            Arc::new(mocks.update),
            Arc::new(mocks.delete),
            Arc::new(mocks.validate),
        );

        let response = api
            .create_product(Json(CreateProductRequest {
                name: "Trackpad".to_string(),
                price: f64::NAN,
            }))
            .await;

        match response {
            CreateProductResponse::BadRequest(json) => {
                assert_eq!(json.0.status, 400);
                assert_eq!(json.0.message, "product.invalid_price");
            }
            _ => panic!("expected a bad request"),
        }
    }

    #[tokio::test]
    async fn should_report_out_of_range_price_as_bad_request() {
        let mut mocks = Mocks::default();
        mocks
            .create
            .expect_execute()
            .returning(|_| Err(ProductError::PriceOutOfRange));
        let client = mocks.into_client();

        let response = client
            .post("/products")
            .body_json(&serde_json::json!({ "name": "Cable", "price": 19.999 }))
            .send()
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json().await;
        json.value()
            .object()
            .get("name")
            .assert_string("ValidationError");
    }
}

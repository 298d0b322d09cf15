mod extract;
mod load;
mod swagger2;
mod types;

pub use extract::extract_endpoints;
pub use load::{
    loader_for, repair_openapi3, repair_swagger2, LoadError, OpenApi3Loader, SpecLoader,
    Swagger2Loader,
};
pub use swagger2::{
    Swagger2Document, Swagger2Info, Swagger2Operation, Swagger2Parameter, Swagger2PathItem,
};
pub use types::{ApiEndpoint, ApiParameter, NormalizedDocument, ParameterLocation};

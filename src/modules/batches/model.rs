pub use isml_models::batches::{
    Batch, BatchListResponse, BatchResponse, CreateBatchDto, NewBatch, REQUIRED_FIELDS_MESSAGE,
    UpdateBatchDto,
};
pub use isml_models::common::{ErrorResponse, MessageResponse};

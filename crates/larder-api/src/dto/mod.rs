//! DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{
    AssignRoleRequest, AssignTipRequest, CreateMeasureRequest, CreateRecipeRequest,
    CreateRoleRequest, CreateStepRequest, CreateStorageRequest, CreateStorageTypeRequest,
    CreateTipRequest, CreateUserRequest, LoginRequest, NameFilter, RecipeStepInput,
    RefreshTokenRequest, SignUpRequest, TipFilter, UpdateMeasureRequest, UpdateRecipeRequest,
    UpdateRoleRequest, UpdateStepRequest, UpdateStorageRequest, UpdateStorageTypeRequest,
    UpdateTipRequest, UpdateUserRequest,
};

pub use response::{
    ApiResponse, ListResponse, LoginResponse, MeasureDto, RecipeDto, RecipeStepDto,
    RefreshTokenResponse, RoleDto, StepDto, StorageDto, StorageTypeDto, StorageTypeRef, TipDto,
    UserDto,
};

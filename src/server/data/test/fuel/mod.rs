use crate::server::{
    data::fuel::FuelRepository,
    model::fuel::{CreateFuelParams, UpdateFuelParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all;
mod soft_delete;

use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::data::combustion_request_fuel::CombustionRequestFuelRepository;

mod links;
mod results;

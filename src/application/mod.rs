//! Application layer
//!
//! One interactor per business operation: a DTO goes in, a result or a domain
//! error comes out, and a mutating interactor commits its unit of work exactly
//! once at the end. Interactors depend only on the gateway capabilities they
//! use, declared in [`interfaces`].

pub mod bot;
pub mod branch;
pub mod city;
pub mod client;
pub mod interfaces;
pub mod manager;
pub mod master;
pub mod service;

pub use bot::{
    BotScopeDto, CreateBot, GetBot, GetBotBranches, GetBotCities, GetBotDto, GetBotMasters,
    GetBotServices, NewBotDto,
};
pub use branch::{
    CreateBranch, CreateBranchDto, DeleteBranch, DeleteBranchDto, GetBranch, GetBranchDto,
    UpdateBranch, UpdateBranchDto,
};
pub use city::{
    CreateCity, CreateCityDto, DeleteCity, DeleteCityDto, GetCity, GetCityBranches,
    GetCityBranchesDto, GetCityDto, UpdateCity, UpdateCityDto,
};
pub use client::{CreateClient, CreateClientDto, GetClient, GetClientDto};
pub use manager::{
    CreateManager, CreateManagerDto, GetManager, GetManagerBots, GetManagerBotsDto, GetManagerDto,
};
pub use master::{
    CreateMaster, CreateMasterDto, DeleteMaster, DeleteMasterDto, GetMaster,
    GetMasterAvailableBranches, GetMasterAvailableBranchesDto, GetMasterAvailableServices,
    GetMasterAvailableServicesDto, GetMasterDto, UpdateMaster, UpdateMasterDto,
    UpdateServiceTimeDto,
};
pub use service::{
    CreateService, CreateServiceDto, DeleteService, DeleteServiceDto, GetService, GetServiceDto,
    UpdateService, UpdateServiceDto,
};

//! Club de Ciclismo EPN - web client
//!
//! Browser client for the club's membership, events and store backend.
//!
//! This library provides:
//! - Session token decoding and the role guard for `/admin` and `/user`
//! - A persistent shopping cart with WhatsApp checkout hand-off
//! - Notification read tracking shared across tabs
//! - Form validation and sanitization
//! - One service module per backend resource
//! - CSV export of sales and balance reports
//! - Web UI (Dioxus, compiled to WebAssembly with the `web` feature)

pub mod app;
pub mod auth;
pub mod cart;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod notifications;
pub mod services;
pub mod storage;
pub mod validation;
pub mod whatsapp;

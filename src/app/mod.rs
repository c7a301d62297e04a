//! Dioxus web application entry point.
//!
//! This module provides the root App component, the route table and the
//! context providers every page relies on.

use dioxus::prelude::*;

pub mod api_context;
pub mod browser;
pub mod cart_context;
pub mod components;
pub mod feedback;
pub mod pages;
pub mod sidebar_context;
pub mod storage_sync;
pub mod toast;
pub mod user_context;

use api_context::use_api_provider;
use cart_context::use_cart_provider;
use components::{AdminShell, AuthLayout, PublicLayout, ToastHost, UserShell};
use pages::admin::{
    AdminEditProfile, AdminWelcome, CreateDocument, CreateEvent, CreateRecord, CreateResource,
    CreateRoute, Documents, EditEvent, EventList, FinancePanel, MemberList, ParticipantList,
    Records, ResourceList, RouteList, UserList,
};
use pages::auth::{
    Login, Register, ResetPassword, SendEmail, Unauthorized, VerifyCode, VerifyEmail,
};
use pages::public::{AboutUs, CartPage, Contact, Home, NotFound, Products, PublicEvents, Sponsors};
use pages::user::{
    AvailableEvents, CreateMembership, MyMembership, Notifications, UserEditProfile, UserWelcome,
};
use sidebar_context::use_sidebar_provider;
use storage_sync::use_notification_sync_provider;
use toast::use_toast_provider;
use user_context::use_user_provider;

/// Root app component with routing
#[component]
pub fn App() -> Element {
    // Order matters: the user provider reads the API context
    use_api_provider();
    use_toast_provider();
    use_user_provider();
    use_cart_provider();
    use_sidebar_provider();
    use_notification_sync_provider();

    rsx! {
        document::Title { "Club de Ciclismo EPN" }
        document::Link { rel: "stylesheet", href: asset!("/public/club.css") }
        Router::<Route> {}
        ToastHost {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(PublicLayout)]
        #[route("/")]
        Home {},
        #[route("/quienes-somos")]
        AboutUs {},
        #[route("/eventos")]
        PublicEvents {},
        #[route("/productos")]
        Products {},
        #[route("/carrito")]
        CartPage {},
        #[route("/auspiciantes")]
        Sponsors {},
        #[route("/contacto")]
        Contact {},
    #[end_layout]

    #[layout(AuthLayout)]
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/send-email")]
        SendEmail {},
        #[route("/verify-code")]
        VerifyCode {},
        #[route("/reset-password?:code")]
        ResetPassword { code: String },
        #[route("/verify-email")]
        VerifyEmail {},
        #[route("/unauthorized")]
        Unauthorized {},
    #[end_layout]

    #[nest("/admin")]
        #[layout(AdminShell)]
            #[route("/")]
            AdminWelcome {},
            #[route("/lista-usuarios")]
            UserList {},
            #[route("/editar-perfil")]
            AdminEditProfile {},
            #[route("/lista-rutas")]
            RouteList {},
            #[route("/crear-ruta")]
            CreateRoute {},
            #[route("/lista-eventos")]
            EventList {},
            #[route("/crear-evento")]
            CreateEvent {},
            #[route("/editar-evento/:id")]
            EditEvent { id: i64 },
            #[route("/lista-participantes")]
            ParticipantList {},
            #[route("/lista-miembros")]
            MemberList {},
            #[route("/lista-recursos")]
            ResourceList {},
            #[route("/crear-recurso")]
            CreateResource {},
            #[route("/lista-documentos")]
            Documents {},
            #[route("/crear-documento")]
            CreateDocument {},
            #[route("/lista-registros")]
            Records {},
            #[route("/crear-registro")]
            CreateRecord {},
            #[route("/panel-financiero")]
            FinancePanel {},
        #[end_layout]
    #[end_nest]

    #[nest("/user")]
        #[layout(UserShell)]
            #[route("/")]
            UserWelcome {},
            #[route("/editar-perfil")]
            UserEditProfile {},
            #[route("/eventos-disponibles")]
            AvailableEvents {},
            #[route("/notificaciones")]
            Notifications {},
            #[route("/mi-membresia")]
            MyMembership {},
            #[route("/crear-membresia")]
            CreateMembership {},
        #[end_layout]
    #[end_nest]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

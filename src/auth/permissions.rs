//! Sidebar links available to each role, grouped by category.

use crate::models::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Personal,
    Users,
    Routes,
    Events,
    Administrative,
    Financial,
    Notifications,
    Membership,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Users => "Usuarios",
            Category::Routes => "Rutas",
            Category::Events => "Eventos",
            Category::Administrative => "Administrativo",
            Category::Financial => "Financiero",
            Category::Notifications => "Notificaciones",
            Category::Membership => "Membresía",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarLink {
    /// Segment below the role's home, e.g. `lista-rutas`.
    pub path: &'static str,
    pub label: &'static str,
    pub category: Category,
}

impl SidebarLink {
    const fn new(path: &'static str, label: &'static str, category: Category) -> Self {
        Self {
            path,
            label,
            category,
        }
    }

    /// Absolute path under the role's home.
    pub fn href(&self, role: Role) -> String {
        format!("{}/{}", role.home_path(), self.path)
    }
}

const ADMIN_LINKS: &[SidebarLink] = &[
    SidebarLink::new("editar-perfil", "Editar Perfil", Category::Personal),
    SidebarLink::new("lista-usuarios", "Lista de Usuarios", Category::Users),
    SidebarLink::new("lista-rutas", "Lista de Rutas", Category::Routes),
    SidebarLink::new("crear-ruta", "Crear Ruta", Category::Routes),
    SidebarLink::new("lista-eventos", "Lista de Eventos", Category::Events),
    SidebarLink::new("lista-participantes", "Lista de Participantes", Category::Events),
    SidebarLink::new("crear-evento", "Crear Evento", Category::Events),
    SidebarLink::new("lista-miembros", "Lista de Miembros", Category::Administrative),
    SidebarLink::new("lista-recursos", "Lista de Recursos", Category::Administrative),
    SidebarLink::new("lista-documentos", "Lista de Documentos", Category::Administrative),
    SidebarLink::new("lista-registros", "Lista de Registros", Category::Financial),
    SidebarLink::new("crear-registro", "Crear Registro", Category::Financial),
    SidebarLink::new("panel-financiero", "Panel Financiero", Category::Financial),
];

const NORMAL_LINKS: &[SidebarLink] = &[
    SidebarLink::new("editar-perfil", "Editar Perfil", Category::Personal),
    SidebarLink::new("eventos-disponibles", "Eventos Disponibles", Category::Events),
    SidebarLink::new("notificaciones", "Notificaciones", Category::Notifications),
    SidebarLink::new("mi-membresia", "Mi Membresía", Category::Membership),
    SidebarLink::new("crear-membresia", "Solicitar Membresía", Category::Membership),
];

pub fn links_for(role: Role) -> &'static [SidebarLink] {
    match role {
        Role::Admin => ADMIN_LINKS,
        Role::Normal => NORMAL_LINKS,
    }
}

/// Same as [`links_for`] but keyed by the raw claim; unknown roles get nothing.
pub fn links_for_name(role: &str) -> &'static [SidebarLink] {
    Role::parse(role).map(links_for).unwrap_or(&[])
}

pub fn links_in(role: Role, category: Category) -> Vec<SidebarLink> {
    links_for(role)
        .iter()
        .filter(|link| link.category == category)
        .copied()
        .collect()
}

/// Categories in first-appearance order.
pub fn categories(role: Role) -> Vec<Category> {
    let mut seen = Vec::new();
    for link in links_for(role) {
        if !seen.contains(&link.category) {
            seen.push(link.category);
        }
    }
    seen
}

/// Sidebar collapse and the single expanded category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    pub collapsed: bool,
    pub open: Option<Category>,
}

/// Viewports at or below this width start with the sidebar collapsed.
pub const COLLAPSE_WIDTH: f64 = 768.0;

impl SidebarState {
    pub fn for_width(width: f64) -> Self {
        Self {
            collapsed: width <= COLLAPSE_WIDTH,
            open: None,
        }
    }

    /// Opening a category closes the previously open one.
    pub fn toggle_category(&mut self, category: Category) {
        self.open = if self.open == Some(category) {
            None
        } else {
            Some(category)
        };
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }
}

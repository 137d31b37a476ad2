// ============================================================================
// ROUTES - Tabla de rutas de la aplicación
// ============================================================================

use crate::models::{Role, RouteDescriptor, RouteMeta, View};

pub fn default_routes() -> Vec<RouteDescriptor> {
    use View::*;
    vec![
        RouteDescriptor::new("/login", "Login", Login, RouteMeta::public()),
        RouteDescriptor::new("/", "Dashboard", Dashboard, RouteMeta::protected()),
        RouteDescriptor::new("/carriers", "Carriers", Carriers, RouteMeta::protected()),
        RouteDescriptor::new("/buyers", "Buyers", Buyers, RouteMeta::protected()),
        RouteDescriptor::new("/materials", "Materials", Materials, RouteMeta::protected()),
        RouteDescriptor::new("/vehicles", "Vehicles", Vehicles, RouteMeta::protected()),
        RouteDescriptor::new("/machinery", "Machinery", Machinery, RouteMeta::protected()),
        RouteDescriptor::new("/employees", "Employees", Employees, RouteMeta::protected()),
        RouteDescriptor::new("/users", "Users", Users, RouteMeta::role(Role::Admin)),
        RouteDescriptor::new("/trip-invoices", "TripInvoices", TripInvoices, RouteMeta::protected()),
        RouteDescriptor::new("/gsm-report", "GSMReport", GsmReport, RouteMeta::protected()),
        RouteDescriptor::new("/machinery-sessions", "MachinerySessions", MachinerySessions, RouteMeta::protected()),
        RouteDescriptor::new("/payroll", "Payroll", Payroll, RouteMeta::protected()),
        RouteDescriptor::new("/delivery-acts", "DeliveryActs", DeliveryActs, RouteMeta::protected()),
        RouteDescriptor::new("/settings", "Settings", Settings, RouteMeta::role(Role::Admin)),
        RouteDescriptor::new("/objects/:id", "ObjectDetails", ObjectDetails, RouteMeta::protected()),
    ]
}

/// Destino de cualquier path sin ruta. No es pública.
pub fn not_found_route() -> RouteDescriptor {
    RouteDescriptor::new("*", "NotFound", View::NotFound, RouteMeta::protected())
}

use crate::models::auth::Role;

/// Vistas de la aplicación (destino de cada ruta)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Dashboard,
    Carriers,
    Buyers,
    Materials,
    Vehicles,
    Machinery,
    Employees,
    Users,
    TripInvoices,
    GsmReport,
    MachinerySessions,
    Payroll,
    DeliveryActs,
    Settings,
    ObjectDetails,
    NotFound,
}

impl View {
    /// Título visible en la cabecera y en el menú
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Вход",
            View::Dashboard => "Дашборд",
            View::Carriers => "Перевозчики",
            View::Buyers => "Покупатели",
            View::Materials => "Материалы",
            View::Vehicles => "Транспорт",
            View::Machinery => "Спецтехника",
            View::Employees => "Сотрудники",
            View::Users => "Пользователи",
            View::TripInvoices => "Рейсовые накладные",
            View::GsmReport => "Отчёт ГСМ",
            View::MachinerySessions => "Смены техники",
            View::Payroll => "Зарплата",
            View::DeliveryActs => "Акты поставки",
            View::Settings => "Настройки",
            View::ObjectDetails => "Объект",
            View::NotFound => "Страница не найдена",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Accesible sin sesión
    pub public: bool,
    pub required_role: Option<Role>,
}

impl RouteMeta {
    pub fn public() -> Self {
        Self { public: true, required_role: None }
    }

    pub fn protected() -> Self {
        Self::default()
    }

    pub fn role(role: Role) -> Self {
        Self { public: false, required_role: Some(role) }
    }
}

/// Entrada de la tabla de rutas. `path` admite segmentos `:param`.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub view: View,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: &'static str, name: &'static str, view: View, meta: RouteMeta) -> Self {
        Self { path, name: Some(name), view, meta }
    }
}

/// Claves en localStorage (compartidas con el cliente anterior)
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "access_token";
pub const STORAGE_KEY_REFRESH_TOKEN: &str = "refresh_token";

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Máximo de redirecciones encadenadas por navegación
pub const MAX_REDIRECTS: usize = 3;

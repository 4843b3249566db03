//! Fixed user-facing messages shown when a backend call fails.

pub const LOGIN_REJECTED: &str = "Usuario o contraseña incorrectos.";
pub const LOGIN_FAILED: &str = "No se pudo conectar con el servidor. Inténtalo de nuevo.";

pub const REGISTRATION_CONFLICT: &str = "El nombre de usuario o DNI ya existe.";
pub const REGISTRATION_FAILED: &str = "Error en el registro. Inténtalo de nuevo.";
pub const REGISTRATION_DONE: &str = "Registro exitoso. Ahora puede iniciar sesión.";

pub const LOGOUT_FAILED: &str = "No se pudo cerrar la sesión.";

pub const DIAGNOSIS_UNAUTHORIZED: &str = "Debes iniciar sesión para realizar un diagnóstico.";
pub const DIAGNOSIS_FAILED: &str = "Error en el diagnóstico. Inténtalo de nuevo.";

pub const RESULTS_FAILED: &str = "No se pudieron cargar los resultados.";

pub const ADMIN_LOAD_FAILED: &str = "Acceso no autorizado o error al cargar datos.";
pub const HISTORY_LOAD_FAILED: &str = "No se pudo cargar el historial del paciente.";

pub const SETTINGS_LOAD_FAILED: &str = "No se pudieron cargar tus datos.";
pub const SETTINGS_SAVE_FAILED: &str = "Error al actualizar datos.";
pub const SETTINGS_SAVED: &str = "Datos actualizados correctamente.";

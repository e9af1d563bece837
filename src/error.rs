//! # Módulo de Errores
//!
//! Errores detectados por los despachadores antes de iniciar cualquier
//! simulación. Nunca se devuelve un resultado parcial.

use std::fmt;

/// Error de validación de los motores de simulación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Nombre de algoritmo de planificación no reconocido
    UnknownAlgorithm(String),
    /// Modo de sincronización no reconocido
    UnknownMode(String),
    /// Falta un parámetro obligatorio para el algoritmo
    MissingParameter {
        algorithm: &'static str,
        parameter: &'static str,
    },
    /// Parámetro presente pero fuera de rango (p. ej. quantum <= 0)
    InvalidParameter {
        parameter: &'static str,
        value: i64,
    },
    /// Registros de entrada estructuralmente inválidos
    MalformedInput(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm(name) => write!(f, "Algoritmo desconocido: {}", name),
            Self::UnknownMode(name) => write!(f, "Modo desconocido: {}", name),
            Self::MissingParameter {
                algorithm,
                parameter,
            } => write!(f, "{} requiere el parámetro '{}'", algorithm, parameter),
            Self::InvalidParameter { parameter, value } => {
                write!(f, "El parámetro '{}' debe ser > 0 (recibido: {})", parameter, value)
            }
            Self::MalformedInput(reason) => write!(f, "Entrada inválida: {}", reason),
        }
    }
}

impl std::error::Error for SimError {}

/// Resultado con `SimError` como error.
pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SimError::UnknownAlgorithm("lifo".into()).to_string(),
            "Algoritmo desconocido: lifo"
        );
        let missing = SimError::MissingParameter {
            algorithm: "Round Robin",
            parameter: "quantum",
        };
        assert!(missing.to_string().contains("quantum"));
        let invalid = SimError::InvalidParameter {
            parameter: "quantum",
            value: -3,
        };
        assert!(invalid.to_string().contains("-3"));
    }
}

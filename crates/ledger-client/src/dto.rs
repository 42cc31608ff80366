use ledger_types::{AssetRecord, MonthlyDepreciation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset line exactly as served by `/api/activos`.
///
/// Every field may be missing or `null`; amounts arrive either as JSON numbers
/// or as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRecordDTO {
    pub codigo: Option<String>,
    pub ceco: Option<String>,
    pub descripcion: Option<String>,
    pub porcentaje_depreciacion: Option<Decimal>,
    pub dep_acumulada_inicio: Option<Decimal>,
    pub ene: Option<Decimal>,
    pub feb: Option<Decimal>,
    pub mar: Option<Decimal>,
    pub abr: Option<Decimal>,
    pub may: Option<Decimal>,
    pub jun: Option<Decimal>,
    pub jul: Option<Decimal>,
    pub ago: Option<Decimal>,
    pub set: Option<Decimal>,
    pub oct: Option<Decimal>,
    pub nov: Option<Decimal>,
    pub dic: Option<Decimal>,
    #[serde(rename = "totalDepreciacion2025")]
    pub total_depreciacion_anual: Option<Decimal>,
    pub total_depreciacion_acumulada: Option<Decimal>,
    pub valor_historico: Option<Decimal>,
    pub costo_neto: Option<Decimal>,
}

impl From<AssetRecordDTO> for AssetRecord {
    fn from(dto: AssetRecordDTO) -> Self {
        Self {
            code: dto.codigo.unwrap_or_default(),
            cost_center: dto.ceco,
            description: dto.descripcion,
            depreciation_rate: dto.porcentaje_depreciacion,
            opening_accumulated_depreciation: dto.dep_acumulada_inicio,
            monthly_depreciation: MonthlyDepreciation::new([
                dto.ene, dto.feb, dto.mar, dto.abr, dto.may, dto.jun, dto.jul, dto.ago, dto.set,
                dto.oct, dto.nov, dto.dic,
            ]),
            total_depreciation_current_year: dto.total_depreciacion_anual,
            total_accumulated_depreciation: dto.total_depreciacion_acumulada,
            historical_value: dto.valor_historico,
            net_cost: dto.costo_neto,
        }
    }
}

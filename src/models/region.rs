//! EIA duoarea regions and fuel grades
//!
//! Reference data for menus and listings. The calculator itself treats the
//! codes as opaque strings.

use serde::Serialize;

/// U.S. regions with their EIA duoarea codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    UsNational,
    Padd1,
    Padd1a,
    Padd2,
    Padd3,
    Padd4,
    Padd5,
    NewYork,
    Texas,
    California,
    Florida,
    Colorado,
    Washington,
    Ohio,
    Minnesota,
    Houston,
    LosAngeles,
    NewYorkMetro,
    Chicago,
    Denver,
    Boston,
    Cleveland,
}

impl Region {
    pub const ALL: [Region; 22] = [
        Region::UsNational,
        Region::Padd1,
        Region::Padd1a,
        Region::Padd2,
        Region::Padd3,
        Region::Padd4,
        Region::Padd5,
        Region::NewYork,
        Region::Texas,
        Region::California,
        Region::Florida,
        Region::Colorado,
        Region::Washington,
        Region::Ohio,
        Region::Minnesota,
        Region::Houston,
        Region::LosAngeles,
        Region::NewYorkMetro,
        Region::Chicago,
        Region::Denver,
        Region::Boston,
        Region::Cleveland,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::UsNational => "NUS",
            Region::Padd1 => "R10",
            Region::Padd1a => "R1X",
            Region::Padd2 => "R20",
            Region::Padd3 => "R30",
            Region::Padd4 => "R40",
            Region::Padd5 => "R50",
            Region::NewYork => "SNY",
            Region::Texas => "STX",
            Region::California => "SCA",
            Region::Florida => "SFL",
            Region::Colorado => "SCO",
            Region::Washington => "SWA",
            Region::Ohio => "SOH",
            Region::Minnesota => "SMN",
            Region::Houston => "Y44HO",
            Region::LosAngeles => "Y05LA",
            Region::NewYorkMetro => "Y35NY",
            Region::Chicago => "YORD",
            Region::Denver => "YDEN",
            Region::Boston => "YBOS",
            Region::Cleveland => "YCLE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::UsNational => "U.S.",
            Region::Padd1 => "PADD 1 (East Coast)",
            Region::Padd1a => "PADD 1A (New England)",
            Region::Padd2 => "PADD 2 (Midwest)",
            Region::Padd3 => "PADD 3 (Gulf Coast)",
            Region::Padd4 => "PADD 4 (Rocky Mountain)",
            Region::Padd5 => "PADD 5 (West Coast)",
            Region::NewYork => "New York",
            Region::Texas => "Texas",
            Region::California => "California",
            Region::Florida => "Florida",
            Region::Colorado => "Colorado",
            Region::Washington => "Washington",
            Region::Ohio => "Ohio",
            Region::Minnesota => "Minnesota",
            Region::Houston => "Houston, TX",
            Region::LosAngeles => "Los Angeles, CA",
            Region::NewYorkMetro => "New York Metro",
            Region::Chicago => "Chicago, IL",
            Region::Denver => "Denver, CO",
            Region::Boston => "Boston, MA",
            Region::Cleveland => "Cleveland, OH",
        }
    }

    /// Case-insensitive lookup; unknown codes map to the national average
    pub fn from_code(code: &str) -> Region {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(code.trim()))
            .unwrap_or(Region::UsNational)
    }
}

/// Gasoline and diesel grades with their EIA product codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuelGrade {
    Regular,
    Midgrade,
    Premium,
    Diesel,
}

impl FuelGrade {
    pub const ALL: [FuelGrade; 4] = [
        FuelGrade::Regular,
        FuelGrade::Midgrade,
        FuelGrade::Premium,
        FuelGrade::Diesel,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FuelGrade::Regular => "EPMR",
            FuelGrade::Midgrade => "EPMM",
            FuelGrade::Premium => "EPMP",
            FuelGrade::Diesel => "EPD2D",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FuelGrade::Regular => "Regular",
            FuelGrade::Midgrade => "Midgrade",
            FuelGrade::Premium => "Premium",
            FuelGrade::Diesel => "Diesel",
        }
    }

    pub fn from_code(code: &str) -> Option<FuelGrade> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EPMR" => Some(FuelGrade::Regular),
            "EPMM" => Some(FuelGrade::Midgrade),
            "EPMP" | "EPMPU" => Some(FuelGrade::Premium),
            "EPD2D" | "EPD2DXL0" => Some(FuelGrade::Diesel),
            _ => None,
        }
    }

    /// Human readable name, or the code itself when unknown
    pub fn display_name_for(code: &str) -> String {
        Self::from_code(code)
            .map(|g| g.display_name().to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

use crate::form::{FormError, FormState, FormVariant};
use crate::RawFeatures;

/// A canned transaction for quick demos, matching the "Test Cases" the
/// original UI shipped.
#[derive(Debug, Clone)]
pub struct Sample {
    pub id: &'static str,
    pub label: &'static str,
    pub features: RawFeatures,
}

impl Sample {
    /// Fills a raw-feature form with this sample's values, as if the user
    /// had typed them.
    pub fn fill(&self, form: &mut FormState) -> Result<(), FormError> {
        form.set("amount", self.features.amount.to_string())?;
        form.set("time", self.features.time.to_string())?;
        for (i, value) in self.features.v.iter().enumerate() {
            form.set(&format!("v{}", i + 1), value.to_string())?;
        }
        Ok(())
    }

    /// A fresh raw-feature form pre-filled with this sample.
    pub fn to_form(&self) -> Result<FormState, FormError> {
        let mut form = FormState::new(FormVariant::RawFeatures);
        self.fill(&mut form)?;
        Ok(form)
    }
}

pub static SAMPLES: [Sample; 4] = [
    Sample {
        id: "legitimate-1",
        label: "Legitimate 1",
        features: RawFeatures {
            amount: 149.62,
            time: 0.0,
            v: [
                -1.359807, -0.072781, 2.536347, 1.378155, -0.338321, 0.462388, 0.239599,
                0.098698, 0.363787, 0.090794, -0.018307, 0.277838, -0.110474, 0.066928,
                0.128539, -0.189115, 0.133558, -0.021053, 0.403993, 0.251412, -0.018307,
                0.277838, -0.110474, 0.066928, 0.128539, -0.189115, 0.133558, -0.021053,
            ],
        },
    },
    Sample {
        id: "legitimate-2",
        label: "Legitimate 2",
        features: RawFeatures {
            amount: 2.69,
            time: 0.0,
            v: [
                1.191857, 0.266151, 0.16648, 0.448154, 0.060018, -0.082361, -0.078803,
                0.085102, -0.255425, -0.166974, -0.225775, -0.638672, 0.101288, -0.339846,
                0.16717, 0.125895, -0.008983, 0.014724, -0.225775, -0.638672, 0.101288,
                -0.339846, 0.16717, 0.125895, -0.008983, 0.014724, -0.008983, 0.014724,
            ],
        },
    },
    Sample {
        id: "fraudulent-1",
        label: "Fraudulent 1",
        features: RawFeatures {
            amount: 378.66,
            time: 1.0,
            v: [
                -1.358354, -1.340163, 1.773209, 0.37978, -0.503198, 1.800499, 0.791461,
                0.247676, -1.514654, 0.207643, 0.247998, 0.771679, 0.909412, -0.689281,
                -0.327642, -0.139097, -0.055353, -0.059752, 0.247998, 0.771679, 0.909412,
                -0.689281, -0.327642, -0.139097, -0.055353, -0.059752, -0.055353, -0.059752,
            ],
        },
    },
    Sample {
        id: "fraudulent-2",
        label: "Fraudulent 2",
        features: RawFeatures {
            amount: 2125.87,
            time: 1.0,
            v: [
                -1.158233, 0.877737, 1.548718, 0.403034, -0.407193, 2.301871, 2.500893,
                -1.509871, 0.16537, 2.032923, -6.560371, 0.022937, -2.234826, 3.00416,
                -4.254772, 0.205977, -0.147004, -0.751367, 0.16537, 2.032923, -6.560371,
                0.022937, -2.234826, 3.00416, -4.254772, 0.205977, -0.147004, -0.751367,
            ],
        },
    },
];

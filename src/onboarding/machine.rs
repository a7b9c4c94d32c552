use crate::domain::goals::Gender;
use crate::domain::ledger::Profile;
use crate::error::TrackerError;

/// Диалог настройки профиля: вес → рост → возраст → пол → активность →
/// город. Каждый шаг несёт уже собранные ответы, так что неудачный ввод
/// ничего не теряет — машина возвращается вызывающему без изменений.
#[derive(Debug, Clone)]
pub enum Onboarding {
    Weight,
    Height {
        weight_kg: f64,
    },
    Age {
        weight_kg: f64,
        height_cm: f64,
    },
    Gender {
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
    },
    Activity {
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
        gender: Gender,
    },
    City {
        weight_kg: f64,
        height_cm: f64,
        age_years: f64,
        gender: Gender,
        activity_min_per_day: f64,
    },
}

/// Результат одного ответа пользователя.
#[derive(Debug)]
pub enum StepOutcome {
    /// Переход к следующему вопросу.
    Next { machine: Onboarding, prompt: &'static str },
    /// Последний ответ принят, профиль собран и проверен.
    Complete(Profile),
}

fn parse_number(input: &str, reprompt: &'static str) -> Result<f64, TrackerError> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TrackerError::ProfileIncomplete(reprompt.into()))
}

impl Onboarding {
    pub fn start() -> Self {
        Onboarding::Weight
    }

    /// Текущий вопрос пользователю.
    pub fn prompt(&self) -> &'static str {
        match self {
            Onboarding::Weight => "Введите вес (кг):",
            Onboarding::Height { .. } => "Введите рост (см):",
            Onboarding::Age { .. } => "Введите возраст (лет):",
            Onboarding::Gender { .. } => "Укажите пол (male/female):",
            Onboarding::Activity { .. } => "Сколько минут активности в день?",
            Onboarding::City { .. } => "В каком городе вы находитесь?",
        }
    }

    /// Pure transition: consumes the machine and an answer, yields either
    /// the next state or `Complete` with a validated profile. On a bad
    /// answer the machine comes back unchanged alongside the error, so the
    /// same step is asked again.
    pub fn reply(self, input: &str) -> Result<StepOutcome, (Self, TrackerError)> {
        match self {
            Onboarding::Weight => match parse_number(input, "Нужно число. Повторите ввод веса (кг):") {
                Ok(weight_kg) if weight_kg > 0.0 => {
                    let machine = Onboarding::Height { weight_kg };
                    let prompt = machine.prompt();
                    Ok(StepOutcome::Next { machine, prompt })
                }
                Ok(_) => Err((
                    Onboarding::Weight,
                    TrackerError::ProfileIncomplete(
                        "Вес должен быть больше нуля. Повторите ввод веса (кг):".into(),
                    ),
                )),
                Err(e) => Err((Onboarding::Weight, e)),
            },
            Onboarding::Height { weight_kg } => {
                match parse_number(input, "Нужно число. Повторите ввод роста (см):") {
                    Ok(height_cm) if height_cm > 0.0 => {
                        let machine = Onboarding::Age {
                            weight_kg,
                            height_cm,
                        };
                        let prompt = machine.prompt();
                        Ok(StepOutcome::Next { machine, prompt })
                    }
                    Ok(_) => Err((
                        Onboarding::Height { weight_kg },
                        TrackerError::ProfileIncomplete(
                            "Рост должен быть больше нуля. Повторите ввод роста (см):".into(),
                        ),
                    )),
                    Err(e) => Err((Onboarding::Height { weight_kg }, e)),
                }
            }
            Onboarding::Age {
                weight_kg,
                height_cm,
            } => match parse_number(input, "Нужно число. Повторите ввод возраста (лет):") {
                Ok(age_years) if age_years > 0.0 => {
                    let machine = Onboarding::Gender {
                        weight_kg,
                        height_cm,
                        age_years,
                    };
                    let prompt = machine.prompt();
                    Ok(StepOutcome::Next { machine, prompt })
                }
                Ok(_) => Err((
                    Onboarding::Age {
                        weight_kg,
                        height_cm,
                    },
                    TrackerError::ProfileIncomplete(
                        "Возраст должен быть больше нуля. Повторите ввод возраста (лет):".into(),
                    ),
                )),
                Err(e) => Err((
                    Onboarding::Age {
                        weight_kg,
                        height_cm,
                    },
                    e,
                )),
            },
            Onboarding::Gender {
                weight_kg,
                height_cm,
                age_years,
            } => match input.parse::<Gender>() {
                Ok(gender) => {
                    let machine = Onboarding::Activity {
                        weight_kg,
                        height_cm,
                        age_years,
                        gender,
                    };
                    let prompt = machine.prompt();
                    Ok(StepOutcome::Next { machine, prompt })
                }
                Err(_) => Err((
                    Onboarding::Gender {
                        weight_kg,
                        height_cm,
                        age_years,
                    },
                    TrackerError::ProfileIncomplete("Введите 'male' или 'female'.".into()),
                )),
            },
            Onboarding::Activity {
                weight_kg,
                height_cm,
                age_years,
                gender,
            } => match parse_number(input, "Нужно число. Повторите ввод активности (мин):") {
                Ok(activity_min_per_day) if activity_min_per_day >= 0.0 => {
                    let machine = Onboarding::City {
                        weight_kg,
                        height_cm,
                        age_years,
                        gender,
                        activity_min_per_day,
                    };
                    let prompt = machine.prompt();
                    Ok(StepOutcome::Next { machine, prompt })
                }
                Ok(_) => Err((
                    Onboarding::Activity {
                        weight_kg,
                        height_cm,
                        age_years,
                        gender,
                    },
                    TrackerError::ProfileIncomplete(
                        "Активность не может быть отрицательной. Повторите ввод (мин):".into(),
                    ),
                )),
                Err(e) => Err((
                    Onboarding::Activity {
                        weight_kg,
                        height_cm,
                        age_years,
                        gender,
                    },
                    e,
                )),
            },
            Onboarding::City {
                weight_kg,
                height_cm,
                age_years,
                gender,
                activity_min_per_day,
            } => {
                let city = input.trim().to_string();
                if city.is_empty() {
                    return Err((
                        Onboarding::City {
                            weight_kg,
                            height_cm,
                            age_years,
                            gender,
                            activity_min_per_day,
                        },
                        TrackerError::ProfileIncomplete(
                            "Город не может быть пустым. В каком городе вы находитесь?".into(),
                        ),
                    ));
                }
                let profile = Profile {
                    weight_kg,
                    height_cm,
                    age_years,
                    gender,
                    activity_min_per_day,
                    city,
                };
                match profile.validate() {
                    Ok(()) => Ok(StepOutcome::Complete(profile)),
                    Err(e) => Err((
                        Onboarding::City {
                            weight_kg,
                            height_cm,
                            age_years,
                            gender,
                            activity_min_per_day,
                        },
                        e,
                    )),
                }
            }
        }
    }
}
